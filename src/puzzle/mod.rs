//! Puzzle catalog data model.
//!
//! The catalog itself (HTTP fetch, retries) lives outside this crate;
//! what the engine consumes is the `(puzzle_id, fen, moves)` triple plus
//! the metadata a lichess-style provider attaches to it.

pub mod data;
pub mod difficulty;

pub use data::PuzzleData;
pub use difficulty::Difficulty;
