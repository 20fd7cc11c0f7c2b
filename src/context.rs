//! Dispatch-facing session context.
//!
//! A tool-dispatch layer (MCP server, CLI, test harness) drives one
//! conversation through one `SessionContext`: construct it once at
//! process start and thread it through every call. The context owns the
//! store and the engine outright; there is no ambient global state, and
//! the single-engine-per-session concurrency rule falls out of ownership.

use im::Vector;
use tracing::info;

use crate::board::Board;
use crate::engine::{MoveEngine, Outcome, PositionSnapshot};
use crate::error::EngineError;
use crate::puzzle::{Difficulty, PuzzleData};
use crate::store::{SearchCriteria, SessionState, StateStore};

/// Everything one interactive puzzle conversation needs.
#[derive(Debug, Default)]
pub struct SessionContext {
    store: StateStore,
    engine: MoveEngine,
    puzzle: Option<PuzzleData>,
    difficulty: Difficulty,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    #[must_use]
    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }

    /// The active puzzle, if one is loaded.
    #[must_use]
    pub fn puzzle(&self) -> Option<&PuzzleData> {
        self.puzzle.as_ref()
    }

    /// Current user difficulty rating.
    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty.rating()
    }

    /// Make `puzzle` the active one: initialize the engine at its start
    /// position and record the initial (empty-history) state as current.
    pub fn load_puzzle(&mut self, puzzle: PuzzleData) -> Result<SessionState, EngineError> {
        self.engine
            .initialize(&puzzle.puzzle_id, &puzzle.fen, puzzle.moves.iter().cloned())?;

        let state = self
            .store
            .create_or_get(puzzle.puzzle_id.clone(), Vector::new(), None);
        self.store.set_current(&state);

        info!(puzzle_id = %puzzle.puzzle_id, rating = puzzle.rating, "loaded puzzle");
        self.puzzle = Some(puzzle);
        Ok(state)
    }

    /// Resume the active puzzle at a given move history: find the stored
    /// state for it (or record it now), replay it into the engine, and
    /// make it current.
    pub fn resume_at<I, S>(
        &mut self,
        history: I,
        message_ref: Option<i64>,
    ) -> Result<SessionState, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let puzzle = self.puzzle.clone().ok_or(EngineError::NoActivePuzzle)?;
        let history: Vector<String> = history.into_iter().map(Into::into).collect();

        let criteria = SearchCriteria::new()
            .with_puzzle_id(&puzzle.puzzle_id)
            .with_move_history(history.clone());
        let state = match self.store.search(&criteria).into_iter().next() {
            Some(found) => found,
            None => self
                .store
                .create_or_get(puzzle.puzzle_id.clone(), history, message_ref),
        };

        self.engine
            .resume(&state, &puzzle.fen, puzzle.moves.iter().cloned())?;
        self.store.set_current(&state);
        Ok(state)
    }

    /// Play one move, adjusting the difficulty rating on a solve or a
    /// wrong move.
    pub fn play_move(&mut self, input: &str) -> (Outcome, String) {
        let (outcome, message) = self.engine.play_move(&mut self.store, input);
        self.record_outcome(outcome);
        (outcome, message)
    }

    /// Play a move sequence with automatic scripted replies.
    pub fn play_sequence<I, S>(&mut self, moves: I) -> (Outcome, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (outcome, messages) = self.engine.play_sequence(&mut self.store, moves);
        self.record_outcome(outcome);
        (outcome, messages)
    }

    pub fn rollback(&mut self, count: i64) -> bool {
        self.engine.rollback(count)
    }

    #[must_use]
    pub fn hint(&self) -> String {
        self.engine.hint()
    }

    #[must_use]
    pub fn current_position(&self) -> PositionSnapshot {
        self.engine.current_position()
    }

    #[must_use]
    pub fn current_state(&self) -> Option<SessionState> {
        self.store.current()
    }

    /// Record a state of the active puzzle attached to an external
    /// correlation id (e.g. the id of a chat message showing the board).
    ///
    /// Deduplication still applies: if the state already exists, its
    /// original `message_ref` is retained and returned.
    pub fn annotate_state<I, S>(
        &mut self,
        history: I,
        message_ref: i64,
    ) -> Result<SessionState, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let puzzle = self.puzzle.as_ref().ok_or(EngineError::NoActivePuzzle)?;
        let history: Vector<String> = history.into_iter().map(Into::into).collect();
        Ok(self
            .store
            .create_or_get(puzzle.puzzle_id.clone(), history, Some(message_ref)))
    }

    /// Reconstruct a board for a stored state of the active puzzle, for
    /// rendering or evaluation by outer layers.
    pub fn board_for(&self, state: &SessionState) -> Result<Board, EngineError> {
        let puzzle = self.puzzle.as_ref().ok_or(EngineError::NoActivePuzzle)?;
        if state.puzzle_id != puzzle.puzzle_id {
            return Err(EngineError::PuzzleMismatch {
                expected: puzzle.puzzle_id.clone(),
                found: state.puzzle_id.clone(),
            });
        }
        Board::replay(&puzzle.fen, state.move_history.iter())
    }

    /// Search stored states.
    #[must_use]
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<SessionState> {
        self.store.search(criteria)
    }

    /// Drop every stored state of a puzzle, returning how many were
    /// removed.
    pub fn evict_puzzle(&mut self, puzzle_id: &str) -> usize {
        self.store.evict_puzzle(puzzle_id)
    }

    fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PuzzleSolved => self.difficulty.record_result(true),
            Outcome::WrongMove => self.difficulty.record_result(false),
            Outcome::Success | Outcome::InvalidMove => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_require_active_puzzle() {
        let mut ctx = SessionContext::new();

        assert!(matches!(
            ctx.resume_at(["e2e4"], None),
            Err(EngineError::NoActivePuzzle)
        ));
        assert!(matches!(
            ctx.annotate_state(["e2e4"], 1),
            Err(EngineError::NoActivePuzzle)
        ));

        let (outcome, _) = ctx.play_move("e2e4");
        assert_eq!(outcome, Outcome::InvalidMove);
    }

    #[test]
    fn test_load_puzzle_records_initial_state() {
        let mut ctx = SessionContext::new();
        let state = ctx.load_puzzle(PuzzleData::fallback()).unwrap();

        assert_eq!(state.move_count(), 0);
        assert_eq!(ctx.current_state().unwrap(), state);
        assert_eq!(ctx.store().len(), 1);
        assert_eq!(ctx.puzzle().unwrap().puzzle_id, "fallback_001");
    }

    #[test]
    fn test_board_for_rejects_foreign_state() {
        let mut ctx = SessionContext::new();
        ctx.load_puzzle(PuzzleData::fallback()).unwrap();

        let foreign = SessionState::new("other", Vector::new(), None);
        assert!(matches!(
            ctx.board_for(&foreign),
            Err(EngineError::PuzzleMismatch { .. })
        ));
    }
}
