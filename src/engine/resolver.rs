//! Move resolution and solution tracking.
//!
//! ## State machine
//!
//! `uninitialized -> player_to_move <-> opponent_to_move -> solved`
//!
//! `initialize`/`resume` enter `player_to_move` (resume derives the turn
//! from history parity). Player and scripted-opponent plies strictly
//! alternate. `solved` is terminal until the next `initialize`/`resume`,
//! except that `rollback` reopens the session.
//!
//! ## Store notification
//!
//! After every applied ply the engine records the new `(puzzle_id,
//! move_history)` state in the [`StateStore`] and points the store at it.
//! The store is passed in per call rather than held, which keeps the
//! single-writer ownership explicit.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::EngineError;
use crate::store::{SessionState, StateStore};

use super::outcome::Outcome;
use super::session::{PositionSnapshot, PuzzleSession};

const NO_HINT: &str = "No hint available";

/// The move-resolution state machine. One live [`PuzzleSession`] at a
/// time; single-threaded, synchronous access.
#[derive(Debug, Default)]
pub struct MoveEngine {
    session: Option<PuzzleSession>,
}

impl MoveEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live session, if one is loaded.
    #[must_use]
    pub fn session(&self) -> Option<&PuzzleSession> {
        self.session.as_ref()
    }

    /// Start a fresh session at `fen` with the given scripted solution.
    ///
    /// Replaces any previous session. Fails with
    /// [`EngineError::InvalidPosition`] if `fen` is not a well-formed
    /// legal position, leaving the previous session intact.
    pub fn initialize<I, S>(
        &mut self,
        puzzle_id: impl Into<String>,
        fen: &str,
        solution: I,
    ) -> Result<&PuzzleSession, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let board = Board::from_fen(fen)?;
        let puzzle_id = puzzle_id.into();
        let solution: SmallVec<[String; 8]> =
            solution.into_iter().map(Into::into).collect();

        info!(%puzzle_id, plies = solution.len(), "initialized puzzle session");
        Ok(self.session.insert(PuzzleSession {
            puzzle_id,
            board,
            move_history: Vector::new(),
            solution,
            cursor: 0,
            is_player_turn: true,
            solved: false,
        }))
    }

    /// Load a stored state: replay its history onto a fresh board from
    /// `fen` and resume from there.
    ///
    /// The cursor is set to the history length and the turn derived from
    /// its parity. `solved` is reset; terminal status is recomputed by the
    /// next move, not here. Fails with [`EngineError::CorruptHistory`] if
    /// any stored move no longer replays, leaving the previous session
    /// intact.
    pub fn resume<I, S>(
        &mut self,
        state: &SessionState,
        fen: &str,
        solution: I,
    ) -> Result<&PuzzleSession, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let board = Board::replay(fen, state.move_history.iter()).inspect_err(|err| {
            warn!(puzzle_id = %state.puzzle_id, %err, "failed to resume stored state");
        })?;
        let solution: SmallVec<[String; 8]> =
            solution.into_iter().map(Into::into).collect();

        info!(
            puzzle_id = %state.puzzle_id,
            plies = state.move_history.len(),
            "resumed puzzle session"
        );
        Ok(self.session.insert(PuzzleSession {
            puzzle_id: state.puzzle_id.clone(),
            board,
            move_history: state.move_history.clone(),
            cursor: state.move_history.len(),
            is_player_turn: state.move_history.len() % 2 == 0,
            solution,
            solved: false,
        }))
    }

    /// Resolve and apply one move.
    ///
    /// The input may be in algebraic or coordinate notation. On a player
    /// ply the resolved move must match the next scripted solution move;
    /// a legal-but-off-script move is rejected as [`Outcome::WrongMove`]
    /// without touching any state. Applied plies are recorded in `store`
    /// and become its current state.
    pub fn play_move(&mut self, store: &mut StateStore, input: &str) -> (Outcome, String) {
        let Some(session) = self.session.as_mut() else {
            return (Outcome::InvalidMove, "No puzzle initialized".to_string());
        };
        if session.solved {
            // Terminal until initialize/resume/rollback.
            return (Outcome::InvalidMove, "Puzzle already solved".to_string());
        }

        let Some(mv) = session.board.resolve(input) else {
            return (
                Outcome::InvalidMove,
                format!("'{input}' is not a valid move"),
            );
        };
        let uci = Board::uci(&mv);

        if session.is_player_turn
            && session.cursor < session.solution.len()
            && uci != session.solution[session.cursor]
        {
            return (
                Outcome::WrongMove,
                "Puzzle expects a different move".to_string(),
            );
        }

        // SAN renders against the pre-move position.
        let san = session.board.san(&mv);
        if !session.board.push(&mv) {
            return (
                Outcome::InvalidMove,
                format!("'{input}' is not a valid move"),
            );
        }

        session.move_history.push_back(uci.clone());
        if session.is_player_turn {
            session.cursor += 1;
        }
        session.is_player_turn = !session.is_player_turn;
        debug!(
            puzzle_id = %session.puzzle_id,
            mv = %uci,
            ply = session.move_history.len(),
            "applied move"
        );

        let state = store.create_or_get(
            session.puzzle_id.clone(),
            session.move_history.clone(),
            None,
        );
        store.set_current(&state);

        if session.cursor >= session.solution.len()
            || session.board.is_checkmate()
            || session.board.is_stalemate()
        {
            session.solved = true;
            info!(puzzle_id = %session.puzzle_id, "puzzle solved");
            return (Outcome::PuzzleSolved, format!("Puzzle solved with {san}!"));
        }

        (Outcome::Success, san)
    }

    /// Apply a sequence of player moves, auto-playing the scripted
    /// opponent reply after each successful player move.
    ///
    /// The reply's message carries an `Opponent:` prefix. Stops
    /// immediately on `InvalidMove` or `PuzzleSolved` from either side;
    /// a `WrongMove` skips the reply (nothing changed, it is still the
    /// player's turn) and continues with the caller's next input.
    ///
    /// Returns the final outcome and every message in order.
    pub fn play_sequence<I, S>(
        &mut self,
        store: &mut StateStore,
        moves: I,
    ) -> (Outcome, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut messages = Vec::new();
        let mut outcome = Outcome::Success;

        for input in moves {
            let (result, message) = self.play_move(store, input.as_ref());
            messages.push(message);
            outcome = result;

            if matches!(outcome, Outcome::InvalidMove | Outcome::PuzzleSolved) {
                break;
            }

            if outcome == Outcome::Success {
                let reply = self.session.as_ref().and_then(|s| {
                    (!s.is_player_turn && s.cursor < s.solution.len())
                        .then(|| s.solution[s.cursor].clone())
                });
                if let Some(reply) = reply {
                    let (opp_outcome, opp_message) = self.play_move(store, &reply);
                    messages.push(format!("Opponent: {opp_message}"));
                    if matches!(opp_outcome, Outcome::InvalidMove | Outcome::PuzzleSolved) {
                        outcome = opp_outcome;
                        break;
                    }
                }
            }
        }

        (outcome, messages)
    }

    /// Undo up to `count` plies from the end of the session.
    ///
    /// The cursor drops by the number of plies actually removed (floored
    /// at zero), the turn is re-derived from history parity, and `solved`
    /// is cleared. Returns whether at least one ply was removed; a
    /// non-positive `count` or an unloaded engine is a no-op returning
    /// false.
    pub fn rollback(&mut self, count: i64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if count <= 0 {
            return false;
        }

        let mut popped: usize = 0;
        while (popped as i64) < count && session.board.pop().is_some() {
            session.move_history.pop_back();
            popped += 1;
        }

        session.cursor = session.cursor.saturating_sub(popped);
        session.is_player_turn = session.move_history.len() % 2 == 0;
        session.solved = false;

        debug!(popped, "rolled back session");
        popped > 0
    }

    /// Read-only snapshot of the current position, or the empty snapshot
    /// when no session is loaded.
    #[must_use]
    pub fn current_position(&self) -> PositionSnapshot {
        let Some(session) = self.session.as_ref() else {
            return PositionSnapshot::default();
        };
        PositionSnapshot {
            fen: session.board.fen(),
            move_history: session.move_history.iter().cloned().collect(),
            is_player_turn: session.is_player_turn,
            solved: session.solved,
            legal_moves: session.board.legal_moves_san(),
        }
    }

    /// The next scripted move as a suggestion, rendered in algebraic
    /// notation against the current position (raw coordinate form if it
    /// no longer renders). A fixed message when no hint applies.
    #[must_use]
    pub fn hint(&self) -> String {
        let Some(session) = self.session.as_ref() else {
            return NO_HINT.to_string();
        };
        if session.solved || session.cursor >= session.solution.len() {
            return NO_HINT.to_string();
        }

        let next = &session.solution[session.cursor];
        match session.board.resolve(next) {
            Some(mv) => format!("Try: {}", session.board.san(&mv)),
            None => format!("Try: {next}"),
        }
    }
}
