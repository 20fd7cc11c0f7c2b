//! The puzzle record consumed by session initialization.

use serde::{Deserialize, Serialize};

/// One chess puzzle as delivered by a lichess-style catalog.
///
/// The engine only needs `puzzle_id`, `fen` and `moves`; the rest is
/// catalog metadata carried through for the dispatch layer to report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleData {
    pub puzzle_id: String,
    /// Starting position in FEN.
    pub fen: String,
    /// Scripted solution in canonical coordinate notation, half-moves
    /// from both sides, player's move first.
    pub moves: Vec<String>,
    pub rating: u32,
    #[serde(default)]
    pub rating_deviation: u32,
    #[serde(default)]
    pub popularity: i32,
    #[serde(default)]
    pub nb_plays: u32,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub game_url: String,
    #[serde(default)]
    pub opening_tags: Vec<String>,
}

impl PuzzleData {
    /// The built-in puzzle used when no catalog is reachable: the final
    /// move of a scholar's mate, a playable mate in one.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            puzzle_id: "fallback_001".to_string(),
            fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
                .to_string(),
            moves: vec!["h5f7".to_string()],
            rating: 1200,
            rating_deviation: 50,
            popularity: 90,
            nb_plays: 1000,
            themes: vec![
                "mate".to_string(),
                "mateIn1".to_string(),
                "oneMove".to_string(),
            ],
            game_url: String::new(),
            opening_tags: vec!["Italian".to_string(), "Game".to_string()],
        }
    }
}
