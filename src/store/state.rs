//! Session state: one reachable board state of one puzzle.
//!
//! ## Identity invariant
//!
//! Two states are equal iff `puzzle_id` and `move_history` are equal.
//! `message_ref` is excluded from equality and hashing: replaying the same
//! moves from the same puzzle always yields the same stored state, no
//! matter who attached what correlation id. This is what makes
//! deduplication in the store correct, so `PartialEq`/`Hash` are written
//! by hand rather than derived.

use std::hash::{Hash, Hasher};

use im::Vector;
use serde::{Deserialize, Serialize};

/// An immutable, deduplicated session state.
///
/// `move_history` is a persistent vector: successive states of the same
/// session share their common prefix structurally, and cloning is O(1).
/// Moves are in canonical coordinate notation (`e2e4`, `e7e8q`); the empty
/// history denotes the puzzle's initial position.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub puzzle_id: String,
    pub move_history: Vector<String>,
    /// External correlation id (e.g. a chat-message id). Not identity.
    pub message_ref: Option<i64>,
}

impl SessionState {
    /// Create a state value. Stored canonically via the store's
    /// `create_or_get`, which is where deduplication happens.
    pub fn new(
        puzzle_id: impl Into<String>,
        move_history: impl Into<Vector<String>>,
        message_ref: Option<i64>,
    ) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            move_history: move_history.into(),
            message_ref,
        }
    }

    /// Number of plies from the puzzle's starting position.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// The explicit composite identity key for this state.
    pub(crate) fn key(&self) -> StateKey {
        StateKey {
            puzzle_id: self.puzzle_id.clone(),
            move_history: self.move_history.clone(),
        }
    }
}

impl PartialEq for SessionState {
    fn eq(&self, other: &Self) -> bool {
        self.puzzle_id == other.puzzle_id && self.move_history == other.move_history
    }
}

impl Hash for SessionState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.puzzle_id.hash(state);
        self.move_history.hash(state);
    }
}

/// Composite map key `(puzzle_id, move_history)`.
///
/// Non-identity fields (`message_ref`, insertion order) live in the
/// store's mapped value, not here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StateKey {
    pub puzzle_id: String,
    pub move_history: Vector<String>,
}
