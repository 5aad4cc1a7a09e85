//! End-to-end tests for the controller: lifecycle, statistics, undo and
//! deferred AI moves.

use noughts_core::{
    AiEngine, Cell, ChannelObserver, ControllerSettings, Difficulty, GameController, GameError,
    GameEvent, GameResult, GameStatus, Mark, Mode, MoveOutcome, Position,
};
use std::time::Duration;

fn game() -> GameController<Vec<GameEvent>> {
    GameController::with_engine(
        Vec::new(),
        ControllerSettings::new(Duration::from_millis(600), Mark::X),
        AiEngine::seeded(17),
    )
}

fn play(game: &mut GameController<Vec<GameEvent>>, moves: &[usize]) -> MoveOutcome {
    let mut last = MoveOutcome::Ignored;
    for &index in moves {
        last = game.select_cell(index).expect("legal move");
    }
    last
}

#[test]
fn test_x_wins_top_row() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    let outcome = play(&mut game, &[0, 4, 1, 7, 2]);

    let MoveOutcome::Finished(GameResult::Won(line)) = outcome else {
        panic!("expected a win, got {outcome:?}");
    };
    assert_eq!(line.mark, Mark::X);
    assert_eq!(line.indices(), [0, 1, 2]);
    assert_eq!(*game.statistics().wins_x(), 1);
    assert_eq!(*game.statistics().streak_x(), 1);

    let events = game.observer();
    assert!(events.contains(&GameEvent::GameEnded {
        result: GameResult::Won(line)
    }));
    assert_eq!(
        events.last(),
        Some(&GameEvent::StatisticsChanged {
            stats: *game.statistics()
        })
    );
}

#[test]
fn test_draw_counts_without_touching_streaks() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4, 1, 7, 2]);
    game.rematch();

    game.start_session(Mode::PvP, None).unwrap();
    let outcome = play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(outcome, MoveOutcome::Finished(GameResult::Draw));
    assert_eq!(*game.statistics().draws(), 1);
    assert_eq!(*game.statistics().streak_x(), 1);
}

#[test]
fn test_streaks_across_rematches() {
    let mut game = game();
    for _ in 0..2 {
        game.start_session(Mode::PvP, None).unwrap();
        play(&mut game, &[0, 4, 1, 7, 2]);
        game.rematch();
    }
    assert_eq!(*game.statistics().streak_x(), 2);

    // O takes the middle column.
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 1, 2, 4, 3, 7]);
    assert_eq!(*game.statistics().streak_x(), 0);
    assert_eq!(*game.statistics().streak_o(), 1);
    assert_eq!(*game.statistics().wins_x(), 2);
}

#[test]
fn test_reset_clears_statistics_but_rematch_does_not() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4, 1, 7, 2]);

    game.rematch();
    assert_eq!(game.session().status(), &GameStatus::NotStarted);
    assert_eq!(game.statistics().games_played(), 1);

    game.reset();
    assert_eq!(game.statistics().games_played(), 0);
    assert!(game.session().board().empty_cells().len() == 9);
}

#[test]
fn test_rematch_clears_cells_through_observer() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4]);
    game.observer_mut().clear();

    game.rematch();
    let cleared: Vec<_> = game
        .observer()
        .iter()
        .filter_map(|event| match event {
            GameEvent::CellUpdated {
                position,
                cell: Cell::Empty,
            } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(cleared, vec![Position::TopLeft, Position::Center]);
}

#[test]
fn test_input_after_game_over_is_ignored() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4, 1, 7, 2]);
    let stats = *game.statistics();

    assert_eq!(game.request_undo(), Err(GameError::NoHistory));
    assert_eq!(game.press_key('6'), MoveOutcome::Ignored);
    assert_eq!(game.statistics(), &stats);
}

#[test]
fn test_cell_selected_after_win_is_silent_no_op() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4, 1, 7, 2]);
    let session = game.session().clone();
    let events_before = game.observer().len();

    assert_eq!(game.select_cell(5), Ok(MoveOutcome::Ignored));
    assert_eq!(game.session(), &session);
    assert_eq!(game.observer().len(), events_before);
}

#[test]
fn test_cell_selected_after_draw_is_silent_no_op() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.session().status(), &GameStatus::Draw);
    let events_before = game.observer().len();

    assert_eq!(game.select_cell(4), Ok(MoveOutcome::Ignored));
    assert_eq!(game.observer().len(), events_before);
}

#[test]
fn test_occupied_cell_is_rejected_without_mutation() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[4]);
    let session = game.session().clone();

    assert_eq!(game.select_cell(4), Err(GameError::CellOccupied(Position::Center)));
    assert_eq!(game.press_key('5'), MoveOutcome::Ignored);
    assert_eq!(game.session(), &session);
}

#[test]
fn test_pvp_undo_is_strict_inverse() {
    let mut game = game();
    game.start_session(Mode::PvP, None).unwrap();
    play(&mut game, &[0, 4]);
    let before = game.session().clone();

    play(&mut game, &[8]);
    assert_eq!(game.request_undo(), Ok(None));
    assert_eq!(game.session().board(), before.board());
    assert_eq!(game.session().turn(), before.turn());
    assert_eq!(
        game.observer().last(),
        Some(&GameEvent::TurnChanged { mark: Mark::X })
    );
}

#[test]
fn test_difficulty_requires_ai_setup() {
    let mut game = game();
    assert!(matches!(
        game.select_difficulty(Difficulty::Hard),
        Err(GameError::InvalidModeTransition { .. })
    ));

    game.start_session(Mode::PvAi, None).unwrap();
    assert_eq!(game.session().status(), &GameStatus::AwaitingDifficulty);
    assert_eq!(game.select_cell(0), Ok(MoveOutcome::Ignored));

    assert_eq!(game.select_difficulty(Difficulty::Hard), Ok(None));
    assert_eq!(game.session().status(), &GameStatus::InProgress);
    assert!(game.select_difficulty(Difficulty::Easy).is_err());
}

#[test]
fn test_human_input_ignored_while_ai_pending() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Hard)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(ticket),
        ..
    } = game.select_cell(4).unwrap()
    else {
        panic!("AI should be scheduled");
    };
    assert_eq!(*ticket.delay(), Duration::from_millis(600));

    assert_eq!(game.select_cell(0), Ok(MoveOutcome::Ignored));
    assert_eq!(game.press_key('1'), MoveOutcome::Ignored);
    assert_eq!(game.session().board().move_count(), 1);

    let outcome = game.run_ai_move(ticket).unwrap();
    assert!(matches!(outcome, MoveOutcome::Placed { mark: Mark::O, .. }));
    assert_eq!(game.pending_ai(), None);
}

#[test]
fn test_rematch_cancels_pending_ai_move() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Easy)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(stale),
        ..
    } = game.select_cell(0).unwrap()
    else {
        panic!("AI should be scheduled");
    };

    game.rematch();
    assert_eq!(game.pending_ai(), None);
    game.start_session(Mode::PvAi, Some(Difficulty::Easy)).unwrap();

    assert_eq!(game.run_ai_move(stale), Ok(MoveOutcome::Ignored));
    assert_eq!(game.session().board().move_count(), 0);
    assert_eq!(game.session().turn(), Mark::X);
}

#[test]
fn test_reset_cancels_pending_ai_move() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Medium)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(stale),
        ..
    } = game.select_cell(0).unwrap()
    else {
        panic!("AI should be scheduled");
    };

    game.reset();
    assert_eq!(game.run_ai_move(stale), Ok(MoveOutcome::Ignored));
    assert_eq!(game.session().status(), &GameStatus::NotStarted);
}

#[test]
fn test_undo_while_ai_pending_returns_turn_to_human() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Easy)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(stale),
        ..
    } = game.select_cell(0).unwrap()
    else {
        panic!("AI should be scheduled");
    };

    assert_eq!(game.request_undo(), Ok(None));
    assert_eq!(game.session().board().move_count(), 0);
    assert_eq!(game.session().turn(), Mark::X);
    assert_eq!(game.run_ai_move(stale), Ok(MoveOutcome::Ignored));
}

#[test]
fn test_undo_after_ai_reply_rewinds_both_moves() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Easy)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(ticket),
        ..
    } = game.select_cell(4).unwrap()
    else {
        panic!("AI should be scheduled");
    };
    game.run_ai_move(ticket).unwrap();
    assert_eq!(game.session().board().move_count(), 2);

    assert_eq!(game.request_undo(), Ok(None));
    assert_eq!(game.session().board().move_count(), 0);
    assert_eq!(game.session().turn(), Mark::X);
    assert_eq!(game.request_undo(), Err(GameError::NoHistory));
}

#[test]
fn test_mode_change_before_play_is_allowed_but_not_after() {
    let mut game = game();
    game.start_session(Mode::PvAi, None).unwrap();
    game.start_session(Mode::PvP, None).unwrap();
    assert_eq!(game.session().mode(), Some(Mode::PvP));

    assert!(matches!(
        game.start_session(Mode::PvAi, Some(Difficulty::Easy)),
        Err(GameError::InvalidModeTransition { .. })
    ));
}

#[test]
fn test_full_game_against_hard_ai_never_lost() {
    let mut game = game();
    game.start_session(Mode::PvAi, Some(Difficulty::Hard)).unwrap();

    // The human always takes the lowest free cell.
    loop {
        let index = game.session().board().empty_cells()[0].to_index();
        match game.select_cell(index).unwrap() {
            MoveOutcome::Placed {
                ai_move: Some(ticket),
                ..
            } => {
                if let MoveOutcome::Finished(_) = game.run_ai_move(ticket).unwrap() {
                    break;
                }
            }
            MoveOutcome::Finished(_) => break,
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(*game.statistics().wins_x(), 0);
}

#[tokio::test]
async fn test_deferred_ai_move_over_channel() {
    let (observer, mut rx) = ChannelObserver::new();
    let settings = ControllerSettings::new(Duration::from_millis(5), Mark::X);
    let mut game = GameController::with_engine(observer, settings, AiEngine::seeded(4));

    game.start_session(Mode::PvAi, Some(Difficulty::Hard)).unwrap();
    let MoveOutcome::Placed {
        ai_move: Some(ticket),
        ..
    } = game.select_cell(0).unwrap()
    else {
        panic!("AI should be scheduled");
    };

    tokio::time::sleep(*ticket.delay()).await;
    game.run_ai_move(ticket).unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events.last(),
        Some(&GameEvent::TurnChanged { mark: Mark::X })
    );
    // Hard answers a corner opening in the center.
    assert!(events.contains(&GameEvent::CellUpdated {
        position: Position::Center,
        cell: Cell::Marked(Mark::O)
    }));
}
