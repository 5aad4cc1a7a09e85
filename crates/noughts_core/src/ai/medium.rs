//! Medium tier: mostly strategic, sometimes careless.

use super::easy;
use crate::{Board, Mark, Position};
use rand::{Rng, seq::SliceRandom};

/// Chance that a medium move goes through the strategic priorities.
pub const STRATEGIC_PROBABILITY: f64 = 0.7;

/// Picks a move: strategic with [`STRATEGIC_PROBABILITY`], otherwise random.
///
/// The random branch may skip an available win or block.
pub fn select<R: Rng + ?Sized>(board: &Board, ai: Mark, opponent: Mark, rng: &mut R) -> Option<Position> {
    if rng.gen_bool(STRATEGIC_PROBABILITY)
        && let Some(pos) = strategic_move(board, ai, opponent, rng)
    {
        return Some(pos);
    }
    easy::random_move(board, rng)
}

/// Priority order: win, block, center, random free corner.
///
/// Wins and blocks take the lowest index that works. Returns `None` when
/// nothing applies, leaving the caller to fall back to random.
pub fn strategic_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<Position> {
    completing_move(board, ai)
        .or_else(|| completing_move(board, opponent))
        .or_else(|| board.is_empty(Position::Center).then_some(Position::Center))
        .or_else(|| {
            let corners: Vec<_> = Position::CORNERS
                .into_iter()
                .filter(|&pos| board.is_empty(pos))
                .collect();
            corners.choose(rng).copied()
        })
}

/// Lowest-indexed empty cell that completes a line for `mark`.
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    Position::ALL
        .into_iter()
        .find(|&pos| board.wins_with(pos, mark))
}
