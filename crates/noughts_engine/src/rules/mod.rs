//! Game rules for tic-tac-toe.
//!
//! Pure functions over an externally supplied [`Board`]. The rules never
//! store game phase; they classify whatever board they are given.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WINNING_LINES, winner};

use crate::{Board, CELLS, Cell, Mark, MoveError, Outcome};
use tracing::instrument;

/// Returns true iff `index` is on the board and the cell is empty.
pub fn is_cell_free(board: &Board, index: usize) -> bool {
    board.get(index) == Some(Cell::Empty)
}

/// Checks that a mark may be placed at `index`.
///
/// # Errors
///
/// [`MoveError::InvalidIndex`] for an index past 8,
/// [`MoveError::CellOccupied`] for a taken cell.
pub fn check_move(board: &Board, index: usize) -> Result<(), MoveError> {
    match board.get(index) {
        None => Err(MoveError::InvalidIndex(index)),
        Some(Cell::Occupied(_)) => Err(MoveError::CellOccupied(index)),
        Some(Cell::Empty) => Ok(()),
    }
}

/// Returns a copy of `board` with `mark` placed at `index`.
///
/// # Errors
///
/// Same as [`check_move`]; the input board is never modified.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    check_move(board, index)?;
    let mut next = *board;
    next.put(index, Cell::Occupied(mark));
    Ok(next)
}

/// Classifies the board: a win takes priority over a draw.
pub fn is_terminal(board: &Board) -> Option<Outcome> {
    if let Some(mark) = winner(board) {
        Some(Outcome::Winner(mark))
    } else if is_full(board) {
        Some(Outcome::Draw)
    } else {
        None
    }
}

/// Returns the mark to move on a board reached by alternating play.
///
/// X moves when the counts are equal, O when X leads by one. Any other
/// balance cannot come from a legal game and yields `None`, as does a
/// full board.
pub fn next_mark(board: &Board) -> Option<Mark> {
    let x = board.count(Mark::X);
    let o = board.count(Mark::O);
    if x + o == CELLS {
        return None;
    }
    if x == o {
        Some(Mark::X)
    } else if x == o + 1 {
        Some(Mark::O)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cell_free_out_of_range() {
        let board = Board::new();
        assert!(is_cell_free(&board, 0));
        assert!(is_cell_free(&board, 8));
        assert!(!is_cell_free(&board, 9));
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let board = Board::new();
        let next = apply_move(&board, 4, Mark::X).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.get(4), Some(Cell::Occupied(Mark::X)));
        assert_eq!(next.occupied(), 1);
    }

    #[test]
    fn test_apply_move_rejects_occupied_and_out_of_range() {
        let board = apply_move(&Board::new(), 4, Mark::X).unwrap();
        assert_eq!(
            apply_move(&board, 4, Mark::O),
            Err(MoveError::CellOccupied(4))
        );
        assert_eq!(
            apply_move(&board, 12, Mark::O),
            Err(MoveError::InvalidIndex(12))
        );
    }

    #[test]
    fn test_terminal_win_beats_full_board() {
        // Full board where X completed the top row.
        let board: Board = "XXX/OOX/XOO".parse().unwrap();
        assert_eq!(is_terminal(&board), Some(Outcome::Winner(Mark::X)));
    }

    #[test]
    fn test_terminal_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(winner(&board), None);
        assert_eq!(is_terminal(&board), Some(Outcome::Draw));
    }

    #[test]
    fn test_not_terminal_mid_game() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(is_terminal(&board), None);
    }

    #[test]
    fn test_next_mark_alternates() {
        assert_eq!(next_mark(&Board::new()), Some(Mark::X));
        assert_eq!(next_mark(&"X........".parse().unwrap()), Some(Mark::O));
        assert_eq!(next_mark(&"XO.......".parse().unwrap()), Some(Mark::X));
        assert_eq!(next_mark(&"XX.......".parse().unwrap()), None);
        assert_eq!(next_mark(&"O........".parse().unwrap()), None);
    }
}
