//! AI-vs-AI matches.

use crate::config::GameConfig;
use anyhow::{Context, Result, bail};
use noughts_core::{AiEngine, Difficulty, GameController, Mark, Mode, MoveOutcome, Statistics};
use tracing::{debug, info, instrument};

/// Plays `games` games between two AIs through a PvP table.
///
/// Statistics carry across games the way rematches do.
#[instrument(skip(config))]
pub fn run(config: &GameConfig, x: Difficulty, o: Difficulty, games: u32) -> Result<Statistics> {
    // PvP tables never consult their own engine.
    let mut table = GameController::with_engine((), config.controller_settings(), AiEngine::seeded(0));
    let mut x_engine = config.engine_with_offset(1);
    let mut o_engine = config.engine_with_offset(2);

    for game in 1..=games {
        table.start_session(Mode::PvP, None)?;
        loop {
            let mark = table.session().turn();
            let (engine, difficulty) = match mark {
                Mark::X => (&mut x_engine, x),
                Mark::O => (&mut o_engine, o),
            };
            let position = engine
                .select_move(table.session().board(), mark, difficulty)
                .context("AI found no move on a live board")?;

            match table.select_cell(position.to_index())? {
                MoveOutcome::Finished(result) => {
                    debug!(game, %result, "Game finished");
                    break;
                }
                MoveOutcome::Placed { .. } => {}
                MoveOutcome::Ignored => bail!("Move at {} was ignored", position),
            }
        }
        table.rematch();
    }

    info!(games, "Simulation complete");
    Ok(*table.statistics())
}
