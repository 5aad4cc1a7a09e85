//! Interactive play on stdin/stdout.
//!
//! Typed commands and the AI's deferred reply race in one `select!` loop,
//! so at most one of them touches the game at a time.

use crate::config::GameConfig;
use crate::input::{self, Input};
use crate::render::{JsonRenderer, TextRenderer, stats_line};
use anyhow::Result;
use noughts_core::{
    AiTicket, Difficulty, GameController, GameError, GameObserver, GameStatus, Mode, MoveOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument, warn};

type Table = GameController<Box<dyn GameObserver>>;

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(
    config: GameConfig,
    mode: Option<Mode>,
    difficulty: Option<Difficulty>,
    json: bool,
) -> Result<()> {
    let observer: Box<dyn GameObserver> = if json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TextRenderer::new())
    };
    let mut game = GameController::with_engine(observer, config.controller_settings(), config.engine());
    let console = Console { json };

    console.say(input::HELP);
    match mode.or(*config.default_mode()) {
        Some(mode) => {
            let difficulty = difficulty.or(*config.default_difficulty());
            handle(&mut game, Input::Start(mode, difficulty), &console);
        }
        None => console.say("\nChoose `pvp` or `ai` to begin."),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut deadline: Option<(AiTicket, Instant)> = None;

    loop {
        // Keep the original deadline while the same ticket is outstanding.
        deadline = match (game.pending_ai(), deadline) {
            (Some(ticket), Some((current, at))) if current == ticket => Some((current, at)),
            (Some(ticket), _) => Some((ticket, Instant::now() + *ticket.delay())),
            (None, _) => None,
        };

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match input::parse(&line) {
                    Some(Input::Quit) => break,
                    Some(input) => handle(&mut game, input, &console),
                    None if line.trim().is_empty() => {}
                    None => console.say("Unknown command. Type `help`."),
                }
            }
            _ = ai_due(deadline) => {
                if let Some((ticket, _)) = deadline.take() {
                    console.report(game.run_ai_move(ticket).map(|_| ()));
                }
            }
        }
    }

    Ok(())
}

async fn ai_due(deadline: Option<(AiTicket, Instant)>) {
    match deadline {
        Some((_, at)) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn handle(game: &mut Table, input: Input, console: &Console) {
    debug!(?input, "Handling input");
    match input {
        Input::Key(key) => {
            if game.press_key(key) == MoveOutcome::Ignored {
                console.say("That move isn't available right now.");
            }
        }
        Input::Start(mode, difficulty) => {
            console.report(game.start_session(mode, difficulty).map(|_| ()));
            if game.session().status() == &GameStatus::AwaitingDifficulty {
                console.say("Select AI difficulty: easy, medium or hard.");
            }
        }
        Input::Difficulty(difficulty) => {
            console.report(game.select_difficulty(difficulty).map(|_| ()));
        }
        Input::Undo => console.report(game.request_undo().map(|_| ())),
        Input::Rematch => {
            game.rematch();
            console.say("Choose `pvp` or `ai` to begin.");
        }
        Input::Reset => {
            game.reset();
            console.say("Score cleared. Choose `pvp` or `ai` to begin.");
        }
        Input::Stats => console.say(&stats_line(game.statistics())),
        Input::Help => console.say(input::HELP),
        Input::Quit => {}
    }
}

/// Human-facing messages, which JSON mode keeps off stdout.
struct Console {
    json: bool,
}

impl Console {
    fn say(&self, message: &str) {
        if !self.json {
            println!("{}", message);
        }
    }

    fn report(&self, result: Result<(), GameError>) {
        if let Err(e) = result {
            warn!(error = %e, "Request rejected");
            if self.json {
                println!("{}", serde_json::json!({ "event": "error", "message": e.to_string() }));
            } else {
                println!("{}", e);
            }
        }
    }
}
