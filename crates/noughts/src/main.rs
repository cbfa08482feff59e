//! Noughts - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use noughts::{GameConfig, logging, tui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;

    match cli.command.unwrap_or(Command::Play { mode: None }) {
        Command::Play { mode } => {
            logging::init_file(config.log_file()).with_context(|| {
                format!("Opening log file {}", config.log_file().display())
            })?;
            tui::run(config, mode).await
        }
        Command::BestMove { board, mark } => {
            logging::init_stderr();
            match cli::choose_move(&board, mark)? {
                Some(index) => println!("{}", index),
                None => println!("none"),
            }
            Ok(())
        }
    }
}
