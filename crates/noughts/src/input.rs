//! Parsing typed commands.

use noughts_core::{Difficulty, Mode};
use std::str::FromStr;

/// Something the player typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key, `'1'..='9'` for cells.
    Key(char),
    /// Start a game in a mode, optionally with difficulty.
    Start(Mode, Option<Difficulty>),
    /// Choose AI difficulty.
    Difficulty(Difficulty),
    /// Take back the last move.
    Undo,
    /// New game, same score.
    Rematch,
    /// New game, score cleared.
    Reset,
    /// Print the score.
    Stats,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

/// Parses one line. Returns `None` for blank or unrecognised input.
pub fn parse(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let first = words.next()?.to_ascii_lowercase();
    let second = words.next();

    let mut chars = first.chars();
    if let (Some(key), None) = (chars.next(), chars.next())
        && key.is_ascii_digit()
    {
        return Some(Input::Key(key));
    }

    match first.as_str() {
        "undo" | "u" => Some(Input::Undo),
        "rematch" | "r" => Some(Input::Rematch),
        "reset" => Some(Input::Reset),
        "stats" | "s" => Some(Input::Stats),
        "help" | "h" | "?" => Some(Input::Help),
        "quit" | "q" | "exit" => Some(Input::Quit),
        "ai" | "pvai" => {
            let difficulty = match second {
                Some(word) => Some(Difficulty::from_str(word).ok()?),
                None => None,
            };
            Some(Input::Start(Mode::PvAi, difficulty))
        }
        other => {
            if let Ok(mode) = Mode::from_str(other) {
                Some(Input::Start(mode, None))
            } else {
                Difficulty::from_str(other).ok().map(Input::Difficulty)
            }
        }
    }
}

/// Command summary for `help`.
pub const HELP: &str = "\
Commands:
  pvp                      two players on one keyboard
  ai [easy|medium|hard]    play the computer
  easy | medium | hard     pick the AI difficulty
  1-9                      play a cell (1 is top-left, 9 bottom-right)
  undo                     take back the last move
  rematch                  new game, keep the score
  reset                    new game, clear the score
  stats                    show the score
  quit                     leave";
