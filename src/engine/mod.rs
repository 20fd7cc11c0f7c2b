//! The move-resolution state machine and its session types.

pub mod outcome;
pub mod resolver;
pub mod session;

pub use outcome::Outcome;
pub use resolver::MoveEngine;
pub use session::{PositionSnapshot, PuzzleSession};
