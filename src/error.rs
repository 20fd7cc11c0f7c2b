//! Error taxonomy for the puzzle session engine.
//!
//! Unparsable or off-script moves are *outcomes* (`Outcome::InvalidMove`,
//! `Outcome::WrongMove`), not errors: they are recovered locally and never
//! mutate state. Errors here are reserved for upstream data problems -
//! a malformed start position, or a stored history that no longer replays.
//! Neither is fatal to the store; they abort only the affected session.

use thiserror::Error;

/// Hard failures of session construction and state workflow operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The start position failed FEN validation or was not a legal position.
    #[error("invalid start position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    /// A stored move history could not be replayed onto its start position.
    ///
    /// Histories are only ever produced by the engine itself, so this
    /// indicates corruption upstream (wrong puzzle data paired with a
    /// state, or a tampered history).
    #[error("corrupt history: move '{mv}' at ply {ply} cannot be replayed")]
    CorruptHistory { ply: usize, mv: String },

    /// A workflow operation needs an active puzzle and none is loaded.
    #[error("no active puzzle")]
    NoActivePuzzle,

    /// A stored state belongs to a different puzzle than the live one.
    #[error("puzzle mismatch: expected '{expected}', found '{found}'")]
    PuzzleMismatch { expected: String, found: String },
}
