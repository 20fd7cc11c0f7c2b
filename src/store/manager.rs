//! Deduplicated store of reachable session states.
//!
//! The store is a map keyed by the explicit composite identity
//! `(puzzle_id, move_history)`; non-identity data (the external
//! correlation id and an insertion sequence number) is the mapped value.
//! Re-creating an existing identity is a no-op: the first writer's
//! `message_ref` wins, per the identity invariant on [`SessionState`].
//!
//! Single-writer by design. Concurrent readers are fine, but callers that
//! share a store across threads must serialize writes externally.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::criteria::SearchCriteria;
use super::state::{SessionState, StateKey};

/// Per-state data outside the identity key.
#[derive(Clone, Debug)]
struct StateMeta {
    message_ref: Option<i64>,
    /// Monotonic insertion counter; keeps search results deterministic.
    seq: u64,
}

/// Deduplicated session-state store with a single "current state" pointer.
#[derive(Debug, Default)]
pub struct StateStore {
    states: FxHashMap<StateKey, StateMeta>,
    next_seq: u64,
    current: Option<StateKey>,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical stored state for `(puzzle_id, move_history)`,
    /// inserting it first if absent.
    ///
    /// Idempotent under identical identity: on a repeat call the stored
    /// `message_ref` is retained and the given one ignored.
    pub fn create_or_get(
        &mut self,
        puzzle_id: impl Into<String>,
        move_history: impl Into<im::Vector<String>>,
        message_ref: Option<i64>,
    ) -> SessionState {
        let key = StateKey {
            puzzle_id: puzzle_id.into(),
            move_history: move_history.into(),
        };
        let meta = self.states.entry(key.clone()).or_insert_with(|| {
            let seq = self.next_seq;
            self.next_seq += 1;
            debug!(
                puzzle_id = %key.puzzle_id,
                plies = key.move_history.len(),
                "stored new session state"
            );
            StateMeta { message_ref, seq }
        });
        SessionState {
            puzzle_id: key.puzzle_id,
            move_history: key.move_history,
            message_ref: meta.message_ref,
        }
    }

    /// Point the store at `state`, inserting it first if it was never
    /// stored. There is no history stack; the previous pointer is gone.
    pub fn set_current(&mut self, state: &SessionState) {
        if !self.states.contains_key(&state.key()) {
            self.create_or_get(
                state.puzzle_id.clone(),
                state.move_history.clone(),
                state.message_ref,
            );
        }
        self.current = Some(state.key());
    }

    /// The current state, if any.
    #[must_use]
    pub fn current(&self) -> Option<SessionState> {
        let key = self.current.as_ref()?;
        let meta = self.states.get(key)?;
        Some(SessionState {
            puzzle_id: key.puzzle_id.clone(),
            move_history: key.move_history.clone(),
            message_ref: meta.message_ref,
        })
    }

    /// All stored states satisfying every non-`None` predicate, in
    /// insertion order.
    #[must_use]
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<SessionState> {
        let mut hits: Vec<(u64, SessionState)> = self
            .states
            .iter()
            .map(|(key, meta)| {
                (
                    meta.seq,
                    SessionState {
                        puzzle_id: key.puzzle_id.clone(),
                        move_history: key.move_history.clone(),
                        message_ref: meta.message_ref,
                    },
                )
            })
            .filter(|(_, state)| criteria.matches(state))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, state)| state).collect()
    }

    /// Membership test without creation.
    #[must_use]
    pub fn exists(&self, puzzle_id: &str, move_history: &im::Vector<String>) -> bool {
        let key = StateKey {
            puzzle_id: puzzle_id.to_string(),
            move_history: move_history.clone(),
        };
        self.states.contains_key(&key)
    }

    /// Total distinct stored states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Remove every state of the given puzzle, returning how many were
    /// removed. Clears the current pointer if it pointed into the puzzle.
    pub fn evict_puzzle(&mut self, puzzle_id: &str) -> usize {
        let before = self.states.len();
        self.states.retain(|key, _| key.puzzle_id != puzzle_id);
        let removed = before - self.states.len();

        if self
            .current
            .as_ref()
            .is_some_and(|key| key.puzzle_id == puzzle_id)
        {
            self.current = None;
        }

        debug!(puzzle_id, removed, "evicted puzzle states");
        removed
    }
}
