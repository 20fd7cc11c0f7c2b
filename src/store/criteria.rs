//! Multi-field search over stored session states.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::SessionState;

/// A conjunction of optional predicates over [`SessionState`].
///
/// Only non-`None` fields constrain the search. An empty criteria matches
/// every stored state; rejecting unconstrained searches is the dispatch
/// layer's call, via [`SearchCriteria::is_empty`].
///
/// ## Example
///
/// ```
/// use rust_tactics::store::SearchCriteria;
///
/// let criteria = SearchCriteria::new()
///     .with_puzzle_id("Abc12")
///     .with_move_count_min(2);
/// assert!(!criteria.is_empty());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Exact puzzle id.
    pub puzzle_id: Option<String>,
    /// Exact move-history equality.
    pub move_history: Option<Vector<String>>,
    /// Exact ply count.
    pub move_count: Option<usize>,
    /// Minimum ply count (inclusive).
    pub move_count_min: Option<usize>,
    /// Maximum ply count (inclusive).
    pub move_count_max: Option<usize>,
    /// Exact external correlation id.
    pub message_ref: Option<i64>,
}

impl SearchCriteria {
    /// An unconstrained criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_puzzle_id(mut self, puzzle_id: impl Into<String>) -> Self {
        self.puzzle_id = Some(puzzle_id.into());
        self
    }

    #[must_use]
    pub fn with_move_history(mut self, move_history: impl Into<Vector<String>>) -> Self {
        self.move_history = Some(move_history.into());
        self
    }

    #[must_use]
    pub fn with_move_count(mut self, count: usize) -> Self {
        self.move_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_move_count_min(mut self, min: usize) -> Self {
        self.move_count_min = Some(min);
        self
    }

    #[must_use]
    pub fn with_move_count_max(mut self, max: usize) -> Self {
        self.move_count_max = Some(max);
        self
    }

    #[must_use]
    pub fn with_message_ref(mut self, message_ref: i64) -> Self {
        self.message_ref = Some(message_ref);
        self
    }

    /// True if no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzle_id.is_none()
            && self.move_history.is_none()
            && self.move_count.is_none()
            && self.move_count_min.is_none()
            && self.move_count_max.is_none()
            && self.message_ref.is_none()
    }

    /// Evaluate the conjunction against one state.
    #[must_use]
    pub fn matches(&self, state: &SessionState) -> bool {
        if let Some(puzzle_id) = &self.puzzle_id {
            if state.puzzle_id != *puzzle_id {
                return false;
            }
        }
        if let Some(history) = &self.move_history {
            if state.move_history != *history {
                return false;
            }
        }
        if let Some(count) = self.move_count {
            if state.move_count() != count {
                return false;
            }
        }
        if let Some(min) = self.move_count_min {
            if state.move_count() < min {
                return false;
            }
        }
        if let Some(max) = self.move_count_max {
            if state.move_count() > max {
                return false;
            }
        }
        if let Some(message_ref) = self.message_ref {
            if state.message_ref != Some(message_ref) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(puzzle_id: &str, moves: &[&str], message_ref: Option<i64>) -> SessionState {
        SessionState::new(
            puzzle_id,
            moves.iter().map(|m| m.to_string()).collect::<Vector<_>>(),
            message_ref,
        )
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = SearchCriteria::new();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&state("p1", &[], None)));
        assert!(criteria.matches(&state("p2", &["e2e4"], Some(9))));
    }

    #[test]
    fn test_conjunction() {
        let criteria = SearchCriteria::new()
            .with_puzzle_id("p1")
            .with_move_count_min(1)
            .with_move_count_max(2);

        assert!(criteria.matches(&state("p1", &["e2e4"], None)));
        assert!(criteria.matches(&state("p1", &["e2e4", "e7e5"], None)));
        assert!(!criteria.matches(&state("p1", &[], None))); // below min
        assert!(!criteria.matches(&state("p2", &["e2e4"], None))); // wrong puzzle
        assert!(!criteria.matches(&state("p1", &["e2e4", "e7e5", "g1f3"], None))); // above max
    }

    #[test]
    fn test_exact_history_and_count() {
        let criteria = SearchCriteria::new()
            .with_move_history(vec!["e2e4".to_string()])
            .with_move_count(1);

        assert!(criteria.matches(&state("p1", &["e2e4"], None)));
        assert!(!criteria.matches(&state("p1", &["d2d4"], None)));
    }

    #[test]
    fn test_message_ref_predicate() {
        let criteria = SearchCriteria::new().with_message_ref(5);

        assert!(criteria.matches(&state("p1", &[], Some(5))));
        assert!(!criteria.matches(&state("p1", &[], Some(6))));
        assert!(!criteria.matches(&state("p1", &[], None)));
    }
}
