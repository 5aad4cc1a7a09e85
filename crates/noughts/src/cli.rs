//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_core::{Difficulty, Mark, Mode};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a friend or a three-tier AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it is missing)
    #[arg(short, long, default_value = "noughts.toml", global = true)]
    pub config: PathBuf,

    /// Seed for the AI's random choices
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Milliseconds the AI waits before answering
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Start straight away in this mode (pvp or pvai)
        #[arg(long)]
        mode: Option<Mode>,

        /// AI difficulty (easy, medium or hard)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Which mark the human plays against the AI
        #[arg(long)]
        human: Option<Mark>,

        /// Print events as JSON lines instead of drawing the board
        #[arg(long)]
        json: bool,
    },

    /// Let two AIs play each other and print the statistics
    Simulate {
        /// Difficulty of the AI playing X
        #[arg(long, default_value = "hard")]
        x: Difficulty,

        /// Difficulty of the AI playing O
        #[arg(long, default_value = "medium")]
        o: Difficulty,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            mode: None,
            difficulty: None,
            human: None,
            json: false,
        }
    }
}
