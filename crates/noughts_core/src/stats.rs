//! Win, draw and streak counters kept across rematches.

use crate::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lifetime statistics for the current process.
///
/// Survives rematches. Only [`Statistics::reset`] clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Statistics {
    /// Games won by X.
    wins_x: u32,
    /// Games won by O.
    wins_o: u32,
    /// Drawn games.
    draws: u32,
    /// Consecutive wins by X.
    streak_x: u32,
    /// Consecutive wins by O.
    streak_o: u32,
}

impl Statistics {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a win for `mark` and breaks the other mark's streak.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => {
                self.wins_x += 1;
                self.streak_x += 1;
                self.streak_o = 0;
            }
            Mark::O => {
                self.wins_o += 1;
                self.streak_o += 1;
                self.streak_x = 0;
            }
        }
        debug!(stats = ?self, "Recorded win");
    }

    /// Counts a draw. Streaks carry over a draw untouched.
    #[instrument(skip(self))]
    pub fn record_draw(&mut self) {
        self.draws += 1;
        debug!(stats = ?self, "Recorded draw");
    }

    /// Zeroes every counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Wins for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    /// Current streak for `mark`.
    pub fn streak(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.streak_x,
            Mark::O => self.streak_o,
        }
    }

    /// Total finished games.
    pub fn games_played(&self) -> u32 {
        self.wins_x + self.wins_o + self.draws
    }
}
