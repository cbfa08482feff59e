//! Command-line interface for noughts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use noughts::GameMode;
use noughts_engine::{Board, Mark, best_move, rules};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Noughts - tic-tac-toe with a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply when missing)
    #[arg(short, long, default_value = "noughts.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Skip the menu and start in this mode
        #[arg(long, value_enum)]
        mode: Option<GameMode>,
    },

    /// Print the computer's choice for a board and exit
    BestMove {
        /// Nine cells, row by row: X, O, and `.` for empty (e.g. "XX./OO./...")
        board: Board,

        /// Side to move (inferred from the board when omitted)
        #[arg(long)]
        mark: Option<Mark>,
    },
}

/// Cell the engine picks for `board`, or `None` when the board is full.
///
/// Without `mark` the side to move is inferred from the mark counts.
///
/// # Errors
///
/// Fails when `mark` is omitted and the counts fit no alternating game.
#[instrument(skip(board), fields(board = %board.to_string().replace('\n', "/")))]
pub fn choose_move(board: &Board, mark: Option<Mark>) -> Result<Option<usize>> {
    if rules::is_full(board) {
        info!("Board is full");
        return Ok(None);
    }

    let mark = match mark {
        Some(mark) => mark,
        None => rules::next_mark(board)
            .context("Cannot tell whose turn it is on this board; pass --mark")?,
    };

    let choice = best_move(board, mark);
    info!(?choice, %mark, "Best move found");
    Ok(choice)
}
