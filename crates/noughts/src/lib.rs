//! Noughts - tic-tac-toe in the terminal against a friend or a perfect opponent.
//!
//! # Architecture
//!
//! - **Controller**: [`GameController`] owns the board and sequences turns,
//!   reporting [`GameEvent`]s over a channel
//! - **Session**: [`GameSession`] feeds commands to the controller and fires
//!   deferred computer turns after the thinking delay
//! - **TUI**: [`tui`] mirrors events into a view model and draws it with ratatui
//!
//! Rules and move search live in [`noughts_engine`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod tui;

pub use config::{ConfigError, GameConfig};
pub use controller::{
    ComputerTurn, GameController, GameEvent, GameMode, GamePhase, GameState, Status,
};
pub use scheduler::ThinkingScheduler;
pub use session::{Command, Flow, GameSession};
