//! The live puzzle session and its read-only snapshot.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;

/// Mutable state of the one active puzzle.
///
/// Created by `MoveEngine::initialize` or `resume`, replaced by the next
/// one. The board is owned exclusively; it only changes through the
/// engine's own move application.
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    pub(super) puzzle_id: String,
    pub(super) board: Board,
    /// Applied moves in canonical coordinate notation.
    pub(super) move_history: Vector<String>,
    /// The fixed expected solution, half-moves from both sides. Never
    /// mutated after construction.
    pub(super) solution: SmallVec<[String; 8]>,
    /// How many scripted plies have been consumed. Advances on player
    /// plies, decreases only on rollback.
    pub(super) cursor: usize,
    pub(super) is_player_turn: bool,
    pub(super) solved: bool,
}

impl PuzzleSession {
    #[must_use]
    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    #[must_use]
    pub fn move_history(&self) -> &Vector<String> {
        &self.move_history
    }

    #[must_use]
    pub fn solution(&self) -> &[String] {
        &self.solution
    }

    /// Index of the next expected scripted move.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.is_player_turn
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Read-only snapshot of the current position.
///
/// `Default` is the empty snapshot returned when no session is loaded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Current position in FEN; empty when no session is loaded.
    pub fen: String,
    /// Applied moves in canonical coordinate notation.
    pub move_history: Vec<String>,
    pub is_player_turn: bool,
    pub solved: bool,
    /// Every legal move of the current position, in algebraic notation.
    pub legal_moves: Vec<String>,
}

impl PositionSnapshot {
    /// True for the snapshot of an unloaded engine.
    #[must_use]
    pub fn is_unloaded(&self) -> bool {
        self.fen.is_empty()
    }
}
