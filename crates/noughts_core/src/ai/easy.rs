//! Easy tier: a uniformly random empty cell.

use crate::{Board, Position};
use rand::{Rng, seq::SliceRandom};

/// Picks uniformly among the empty cells.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_cells().choose(rng).copied()
}
