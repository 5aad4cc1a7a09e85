//! AI opponents.
//!
//! Each [`Difficulty`] maps to a [`MoveStrategy`]. [`AiEngine`] owns the
//! random source the weaker tiers draw from. Seed it for reproducible play.

pub mod easy;
pub mod medium;
pub mod minimax;

use crate::{Board, Difficulty, Mark, Position};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

/// A way of picking the AI's next cell.
pub trait MoveStrategy {
    /// Picks an empty cell for `ai`, or `None` when the board is full.
    fn choose(
        &self,
        board: &Board,
        ai: Mark,
        opponent: Mark,
        rng: &mut dyn RngCore,
    ) -> Option<Position>;
}

/// Uniformly random play.
#[derive(Debug, Clone, Copy, Default)]
pub struct Random;

/// Win, block, center, corner, usually.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strategic;

/// Full-depth minimax.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl MoveStrategy for Random {
    fn choose(&self, board: &Board, _ai: Mark, _opponent: Mark, rng: &mut dyn RngCore) -> Option<Position> {
        easy::random_move(board, rng)
    }
}

impl MoveStrategy for Strategic {
    fn choose(&self, board: &Board, ai: Mark, opponent: Mark, rng: &mut dyn RngCore) -> Option<Position> {
        medium::select(board, ai, opponent, rng)
    }
}

impl MoveStrategy for Minimax {
    fn choose(&self, board: &Board, ai: Mark, _opponent: Mark, _rng: &mut dyn RngCore) -> Option<Position> {
        minimax::best_move(board, ai)
    }
}

impl Difficulty {
    /// The strategy this difficulty plays with.
    pub fn strategy(self) -> &'static dyn MoveStrategy {
        match self {
            Difficulty::Easy => &Random,
            Difficulty::Medium => &Strategic,
            Difficulty::Hard => &Minimax,
        }
    }
}

/// Picks the AI's move with the strategy for `difficulty`.
///
/// Returns `None` only when the board has no empty cell.
pub fn select_move(
    board: &Board,
    ai: Mark,
    opponent: Mark,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Option<Position> {
    difficulty.strategy().choose(board, ai, opponent, rng)
}

/// Move selection with an owned random source.
#[derive(Debug, Clone)]
pub struct AiEngine {
    rng: StdRng,
}

impl AiEngine {
    /// Creates an engine seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an engine whose Easy and Medium play is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a move for `ai` against its opponent.
    #[instrument(skip(self, board), fields(moves_played = board.move_count()))]
    pub fn select_move(&mut self, board: &Board, ai: Mark, difficulty: Difficulty) -> Option<Position> {
        let choice = select_move(board, ai, ai.opponent(), difficulty, &mut self.rng);
        debug!(?choice, "AI chose position");
        choice
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_full_board_yields_none() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.into_iter().enumerate() {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            board.place(pos, mark).unwrap();
        }
        let mut engine = AiEngine::seeded(1);
        for difficulty in Difficulty::iter() {
            assert_eq!(engine.select_move(&board, Mark::O, difficulty), None);
        }
    }

    #[test]
    fn test_every_difficulty_picks_an_empty_cell() {
        let mut board = Board::new();
        board.place(Position::Center, Mark::X).unwrap();
        board.place(Position::TopLeft, Mark::O).unwrap();
        board.place(Position::BottomRight, Mark::X).unwrap();

        let mut engine = AiEngine::seeded(7);
        for difficulty in Difficulty::iter() {
            for _ in 0..50 {
                let pos = engine.select_move(&board, Mark::O, difficulty).unwrap();
                assert!(board.is_empty(pos), "{difficulty} picked occupied {pos}");
            }
        }
    }

    #[test]
    fn test_seeded_engines_agree() {
        let board = Board::new();
        let mut a = AiEngine::seeded(42);
        let mut b = AiEngine::seeded(42);
        for _ in 0..20 {
            assert_eq!(
                a.select_move(&board, Mark::X, Difficulty::Easy),
                b.select_move(&board, Mark::X, Difficulty::Easy)
            );
        }
    }
}
