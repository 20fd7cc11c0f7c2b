//! User difficulty tracking.

use serde::{Deserialize, Serialize};

const START_RATING: u32 = 1200;
const MIN_RATING: u32 = 800;
const MAX_RATING: u32 = 2500;

/// A coarse user rating nudged by puzzle results: up on a solve, down
/// (by half as much) on a wrong move, clamped to a sane band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    rating: u32,
}

impl Difficulty {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rating: START_RATING,
        }
    }

    #[must_use]
    pub fn rating(&self) -> u32 {
        self.rating
    }

    /// Record a puzzle result: solved bumps the rating by 50 (capped at
    /// 2500), a failure drops it by 25 (floored at 800).
    pub fn record_result(&mut self, solved: bool) {
        if solved {
            self.rating = (self.rating + 50).min(MAX_RATING);
        } else {
            self.rating = self.rating.saturating_sub(25).max(MIN_RATING);
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}
