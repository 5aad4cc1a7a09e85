//! Noughts - terminal tic-tac-toe
//!
//! Play a friend or the computer, or watch two AIs play each other.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod input;
mod play;
mod render;
mod simulate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays the game display.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.clone().unwrap_or_default();
    let human = match &command {
        Command::Play { human, .. } => *human,
        Command::Simulate { .. } => None,
    };
    let config =
        GameConfig::load_or_default(&cli.config)?.with_overrides(cli.seed, cli.delay_ms, human);
    info!(?config, "Starting noughts");

    match command {
        Command::Play {
            mode,
            difficulty,
            json,
            ..
        } => play::run(config, mode, difficulty, json).await,
        Command::Simulate { x, o, games } => {
            let stats = simulate::run(&config, x, o, games)?;
            println!("X ({}) vs O ({}) over {} games", x, o, games);
            println!("{}", render::stats_line(&stats));
            Ok(())
        }
    }
}
