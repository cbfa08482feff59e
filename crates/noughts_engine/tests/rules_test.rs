//! Exhaustive checks of the rules engine over every 3x3 board.

use noughts_engine::rules::{self, WINNING_LINES};
use noughts_engine::{Board, CELLS, Cell, Mark, Outcome};

/// Every assignment of {Empty, X, O} to the nine cells (3^9 boards).
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3u32.pow(CELLS as u32)).map(|mut code| {
        let mut cells = [Cell::Empty; CELLS];
        for cell in cells.iter_mut() {
            *cell = match code % 3 {
                0 => Cell::Empty,
                1 => Cell::Occupied(Mark::X),
                _ => Cell::Occupied(Mark::O),
            };
            code /= 3;
        }
        Board::from_cells(cells)
    })
}

fn completes_line(board: &Board, mark: Mark) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&i| board.get(i) == Some(Cell::Occupied(mark))))
}

#[test]
fn test_winner_iff_some_line_is_complete() {
    for board in all_boards() {
        let x = completes_line(&board, Mark::X);
        let o = completes_line(&board, Mark::O);
        let found = rules::winner(&board);

        match (x, o) {
            (false, false) => assert_eq!(found, None, "phantom winner on\n{board}"),
            (true, false) => assert_eq!(found, Some(Mark::X), "missed X on\n{board}"),
            (false, true) => assert_eq!(found, Some(Mark::O), "missed O on\n{board}"),
            // Unreachable in play; either line may be reported.
            (true, true) => assert!(found.is_some()),
        }
    }
}

#[test]
fn test_terminal_prefers_win_over_draw() {
    for board in all_boards() {
        let terminal = rules::is_terminal(&board);
        match rules::winner(&board) {
            Some(mark) => assert_eq!(terminal, Some(Outcome::Winner(mark))),
            None if rules::is_full(&board) => assert_eq!(terminal, Some(Outcome::Draw)),
            None => assert_eq!(terminal, None),
        }
    }
}

#[test]
fn test_is_cell_free_matches_check_move() {
    for board in all_boards().step_by(97) {
        for index in 0..=CELLS {
            assert_eq!(
                rules::is_cell_free(&board, index),
                rules::check_move(&board, index).is_ok()
            );
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOX/OOX/XXO".parse().unwrap();
    assert!(rules::is_full(&board));
    assert_eq!(rules::is_terminal(&board), Some(Outcome::Draw));
}
