//! Classification of a move attempt.

use serde::{Deserialize, Serialize};

/// Result of attempting a move against the live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Move was legal, on-script, and applied.
    Success,
    /// Input was unparsable or illegal, or no session is loaded.
    /// Nothing changed.
    InvalidMove,
    /// Move was chess-legal but not the puzzle's expected move.
    /// Nothing changed.
    WrongMove,
    /// Move was applied and it finished the puzzle: the scripted solution
    /// is fully consumed, or the position is checkmate/stalemate.
    PuzzleSolved,
}

impl Outcome {
    /// True for outcomes that left the session unchanged.
    #[must_use]
    pub fn is_rejection(self) -> bool {
        matches!(self, Outcome::InvalidMove | Outcome::WrongMove)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Success => "success",
            Outcome::InvalidMove => "invalid_move",
            Outcome::WrongMove => "wrong_move",
            Outcome::PuzzleSolved => "puzzle_solved",
        };
        f.write_str(s)
    }
}
