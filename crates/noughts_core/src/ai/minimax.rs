//! Hard tier: exhaustive minimax.
//!
//! Search mutates one scratch board in place and takes each trial move
//! back before trying the next.

use crate::{Board, Cell, Mark, Position};
use tracing::instrument;

/// Score of a win found at depth 0.
pub const WIN_SCORE: i32 = 10;

/// Best cell for `ai`, or `None` on a full board.
///
/// Ties go to the lowest index.
#[instrument(skip(board), fields(moves_played = board.move_count()))]
pub fn best_move(board: &Board, ai: Mark) -> Option<Position> {
    let mut scratch = *board;
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_cells() {
        scratch.set(pos, Cell::Marked(ai));
        let value = score(&mut scratch, ai, 0, false);
        scratch.set(pos, Cell::Empty);

        if best.is_none_or(|(_, top)| value > top) {
            best = Some((pos, value));
        }
    }

    best.map(|(pos, _)| pos)
}

/// Minimax value of `board` from `ai`'s point of view.
///
/// A win for `ai` scores `10 - depth`, a loss `depth - 10`, a full board 0.
/// `maximizing` says whether `ai` moves next. `board` is returned unchanged.
pub fn score(board: &mut Board, ai: Mark, depth: i32, maximizing: bool) -> i32 {
    if let Some(line) = board.check_win() {
        return if line.mark == ai {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if board.is_full() {
        return 0;
    }

    let mover = if maximizing { ai } else { ai.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Cell::Marked(mover));
        let value = score(board, ai, depth + 1, !maximizing);
        board.set(pos, Cell::Empty);

        best = if maximizing { best.max(value) } else { best.min(value) };
    }

    best
}
