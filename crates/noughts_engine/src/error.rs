//! Move rejection reasons.

/// Error that can occur when validating or applying a move.
///
/// None of these are fatal: the game controller rejects the move and
/// leaves its state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index outside 0..=8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// No game is in progress.
    #[display("No game in progress")]
    NotInProgress,

    /// It is the computer's turn; human input is ignored until it moves.
    #[display("Waiting for the computer to move")]
    AwaitingComputer,
}

impl std::error::Error for MoveError {}
