//! # rust-tactics
//!
//! A chess puzzle session engine for tool-driven interactive solving.
//!
//! A remote tool-calling agent fetches a puzzle, submits moves in either
//! notation, branches across alternative lines, rolls back, and asks for
//! hints. This crate is the in-process core behind those tools:
//!
//! - **Deduplicated state store**: every board state reached in a puzzle
//!   is stored once, keyed by `(puzzle_id, move_history)`, searchable by
//!   any combination of fields, with a single "current state" pointer.
//!
//! - **Move-resolution state machine**: the live session validates each
//!   input against chess legality and against the puzzle's fixed solution,
//!   auto-plays scripted opponent replies, supports rollback and hints,
//!   and reports a typed outcome plus a human-readable message.
//!
//! ## Design Principles
//!
//! 1. **Rules are delegated**: chess legality, SAN/UCI and FEN come from
//!    `shakmaty`. The engine never second-guesses them.
//!
//! 2. **Identity is `(puzzle_id, move_history)`**: correlation ids ride
//!    along but never participate in equality, which is what makes
//!    deduplication correct.
//!
//! 3. **No ambient state**: a [`SessionContext`] owns one store and one
//!    engine and is threaded through dispatch calls explicitly. One
//!    context per conversation; no locking inside.
//!
//! ## Modules
//!
//! - `board`: chess-rules capability adapter over `shakmaty`
//! - `store`: deduplicated session states, search, current pointer
//! - `engine`: move resolution, solution tracking, rollback, hints
//! - `puzzle`: catalog data model and difficulty tracking
//! - `context`: per-conversation bundle for the dispatch layer

pub mod board;
pub mod context;
pub mod engine;
pub mod error;
pub mod puzzle;
pub mod store;

// Re-export commonly used types
pub use crate::board::Board;
pub use crate::context::SessionContext;
pub use crate::engine::{MoveEngine, Outcome, PositionSnapshot, PuzzleSession};
pub use crate::error::EngineError;
pub use crate::puzzle::{Difficulty, PuzzleData};
pub use crate::store::{SearchCriteria, SessionState, StateStore};
