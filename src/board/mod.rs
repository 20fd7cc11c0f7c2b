//! Chess-rules capability adapter.
//!
//! The engine never implements chess legality itself. This module wraps
//! `shakmaty` behind the exact surface the session engine consumes:
//!
//! - position construction from FEN, and replay of a stored history
//! - two-stage move resolution: algebraic notation first, then coordinate
//!   notation, legality-checked in both stages
//! - apply/undo with an explicit position stack (`shakmaty` positions are
//!   immutable values, so undo restores the prior position instead of
//!   reversing the move)
//! - SAN and canonical coordinate (UCI) rendering, legal-move listing,
//!   checkmate/stalemate detection
//!
//! Canonical coordinate notation (`e2e4`, `e7e8q`) is the identity key
//! for stored session states and must stay stable across renderers.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use crate::error::EngineError;

/// A live chess position with undo support.
///
/// Owned exclusively by the engine's session; all mutation goes through
/// [`Board::push`] and [`Board::pop`].
#[derive(Clone, Debug)]
pub struct Board {
    pos: Chess,
    /// Positions before each applied move, oldest first.
    stack: Vec<(Chess, Move)>,
}

impl Board {
    /// Construct a board from a FEN start position.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed = fen
            .parse::<Fen>()
            .map_err(|e| EngineError::InvalidPosition {
                fen: fen.to_string(),
                reason: e.to_string(),
            })?;
        let pos = parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| EngineError::InvalidPosition {
                fen: fen.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            pos,
            stack: Vec::new(),
        })
    }

    /// Construct a board from a FEN start position and replay a move
    /// history in canonical coordinate notation.
    ///
    /// Fails with [`EngineError::CorruptHistory`] on the first move that
    /// does not parse or is illegal when replayed.
    pub fn replay<I>(fen: &str, moves: I) -> Result<Self, EngineError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut board = Self::from_fen(fen)?;
        for (ply, mv) in moves.into_iter().enumerate() {
            let mv = mv.as_ref();
            let resolved = board.resolve(mv).ok_or_else(|| EngineError::CorruptHistory {
                ply,
                mv: mv.to_string(),
            })?;
            if !board.push(&resolved) {
                return Err(EngineError::CorruptHistory {
                    ply,
                    mv: mv.to_string(),
                });
            }
        }
        Ok(board)
    }

    /// Resolve a move string against the current position.
    ///
    /// Two-stage tagged parse: algebraic notation first, coordinate
    /// notation second. Both stages check legality, so `Some` always
    /// carries a move playable right now; `None` means unparsable or
    /// illegal. No error-driven control flow.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<Move> {
        if let Ok(san) = input.parse::<SanPlus>() {
            if let Ok(m) = san.san.to_move(&self.pos) {
                return Some(m);
            }
        }
        if let Ok(uci) = input.parse::<UciMove>() {
            if let Ok(m) = uci.to_move(&self.pos) {
                return Some(m);
            }
        }
        None
    }

    /// Apply a move, pushing the prior position onto the undo stack.
    ///
    /// Returns false (and changes nothing) if the move is not legal.
    pub fn push(&mut self, m: &Move) -> bool {
        match self.pos.clone().play(m) {
            Ok(next) => {
                let prev = std::mem::replace(&mut self.pos, next);
                self.stack.push((prev, m.clone()));
                true
            }
            Err(_) => false,
        }
    }

    /// Undo the most recent move. Returns the move undone, or `None` at
    /// the start position.
    pub fn pop(&mut self) -> Option<Move> {
        let (prev, m) = self.stack.pop()?;
        self.pos = prev;
        Some(m)
    }

    /// Number of plies applied since the start position.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.stack.len()
    }

    /// Side to move.
    #[must_use]
    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    /// Current position in FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    /// Render a move in algebraic notation (with check/mate suffix),
    /// relative to the current position.
    #[must_use]
    pub fn san(&self, m: &Move) -> String {
        SanPlus::from_move(self.pos.clone(), m).to_string()
    }

    /// Render a move in canonical coordinate notation (`e2e4`, `e7e8q`).
    #[must_use]
    pub fn uci(m: &Move) -> String {
        m.to_uci(CastlingMode::Standard).to_string()
    }

    /// All legal moves of the current position, in algebraic notation.
    #[must_use]
    pub fn legal_moves_san(&self) -> Vec<String> {
        self.pos
            .legal_moves()
            .iter()
            .map(|m| self.san(m))
            .collect()
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }
}
