//! Behavioural properties of the AI tiers.

use noughts_core::ai::{medium, minimax};
use noughts_core::{AiEngine, Board, Difficulty, Mark, Position};
use rand::{SeedableRng, rngs::StdRng};

/// Walks every game where `ai` plays minimax and the opponent tries everything.
///
/// Returns the number of finished games visited.
fn explore(board: Board, to_move: Mark, ai: Mark) -> usize {
    if let Some(line) = board.check_win() {
        assert_eq!(line.mark, ai, "minimax lost:\n{board}");
        return 1;
    }
    if board.is_full() {
        return 1;
    }

    if to_move == ai {
        let pos = minimax::best_move(&board, ai).expect("board has room");
        let mut next = board;
        next.place(pos, ai).unwrap();
        explore(next, ai.opponent(), ai)
    } else {
        board
            .empty_cells()
            .into_iter()
            .map(|pos| {
                let mut next = board;
                next.place(pos, to_move).unwrap();
                explore(next, ai, ai)
            })
            .sum()
    }
}

#[test]
fn test_hard_playing_second_never_loses() {
    let games = explore(Board::new(), Mark::X, Mark::O);
    assert!(games > 0);
}

#[test]
fn test_hard_playing_first_never_loses() {
    let games = explore(Board::new(), Mark::X, Mark::X);
    assert!(games > 0);
}

#[test]
fn test_hard_versus_hard_is_a_draw() {
    let mut engine = AiEngine::seeded(0);
    let mut board = Board::new();
    let mut mark = Mark::X;
    while board.check_win().is_none() && !board.is_full() {
        let pos = engine
            .select_move(&board, mark, Difficulty::Hard)
            .expect("board has room");
        board.place(pos, mark).unwrap();
        mark = mark.opponent();
    }
    assert_eq!(board.check_win(), None);
    assert!(board.is_full());
}

#[test]
fn test_hard_is_deterministic() {
    let mut board = Board::new();
    board.place(Position::TopCenter, Mark::X).unwrap();
    let first = minimax::best_move(&board, Mark::O);
    for seed in 0..5 {
        let mut engine = AiEngine::seeded(seed);
        assert_eq!(engine.select_move(&board, Mark::O, Difficulty::Hard), first);
    }
}

#[test]
fn test_medium_strategic_branch_takes_the_only_win() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Mark::X).unwrap();
    board.place(Position::TopRight, Mark::O).unwrap();
    board.place(Position::Center, Mark::X).unwrap();
    board.place(Position::BottomRight, Mark::O).unwrap();
    board.place(Position::BottomCenter, Mark::X).unwrap();
    // O threatens 5 (column 2-5-8); X threatens 1 (column 1-4-7).
    assert_eq!(medium::completing_move(&board, Mark::O), Some(Position::MiddleRight));

    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        assert_eq!(
            medium::strategic_move(&board, Mark::O, Mark::X, &mut rng),
            Some(Position::MiddleRight)
        );
    }
}

#[test]
fn test_medium_usually_finds_the_win() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Mark::O).unwrap();
    board.place(Position::Center, Mark::X).unwrap();
    board.place(Position::TopCenter, Mark::O).unwrap();
    board.place(Position::BottomRight, Mark::X).unwrap();
    board.place(Position::MiddleLeft, Mark::X).unwrap();

    let mut engine = AiEngine::seeded(99);
    let trials = 1000;
    let wins = (0..trials)
        .filter(|_| engine.select_move(&board, Mark::O, Difficulty::Medium) == Some(Position::TopRight))
        .count();
    // 0.7 strategic plus a 1/4 share of the random 0.3 is 0.775.
    assert!((650..=870).contains(&wins), "took the win {wins} times out of {trials}");
}
