//! Pure tic-tac-toe rules and an exhaustive minimax opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Cell`], [`Mark`], [`Outcome`], [`Position`]
//! - **Rules**: stateless functions in [`rules`] that validate moves and
//!   classify boards
//! - **Search**: [`MoveSelector`] scores every reply to the end of the game
//!
//! # Example
//!
//! ```
//! use noughts_engine::{best_move, rules, Board, Mark};
//!
//! let board: Board = "XX./OO./...".parse()?;
//! assert_eq!(best_move(&board, Mark::X), Some(2));
//!
//! let board = rules::apply_move(&board, 2, Mark::X)?;
//! assert_eq!(rules::winner(&board), Some(Mark::X));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod minimax;
mod position;
mod types;

pub mod rules;

pub use error::MoveError;
pub use minimax::{MoveSelector, best_move, score};
pub use position::Position;
pub use types::{Board, CELLS, Cell, Mark, Outcome, ParseBoardError};
