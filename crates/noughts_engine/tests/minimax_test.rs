//! Tests verifying the minimax selector plays tic-tac-toe perfectly.
//!
//! Perfect play means:
//! - Never losing, whatever the opponent does
//! - Drawing against itself
//! - Taking an available win before blocking

use noughts_engine::{Board, Cell, Mark, MoveSelector, Outcome, best_move, rules};
use std::collections::HashSet;

/// Collects every board reachable by alternating legal play from empty.
fn reachable(board: Board, to_move: Mark, seen: &mut HashSet<Board>) {
    if !seen.insert(board) || rules::is_terminal(&board).is_some() {
        return;
    }
    let free: Vec<usize> = board.empty_cells().collect();
    for index in free {
        let next = rules::apply_move(&board, index, to_move).unwrap();
        reachable(next, to_move.opponent(), seen);
    }
}

/// Plays the engine against every possible opponent line and fails on a loss.
///
/// Returns the number of finished games explored.
fn never_loses(board: Board, to_move: Mark, engine: Mark) -> usize {
    if let Some(outcome) = rules::is_terminal(&board) {
        assert_ne!(
            outcome,
            Outcome::Winner(engine.opponent()),
            "engine ({engine}) lost:\n{board}"
        );
        return 1;
    }

    if to_move == engine {
        let index = best_move(&board, engine).expect("non-full board has a move");
        let next = rules::apply_move(&board, index, engine).unwrap();
        never_loses(next, to_move.opponent(), engine)
    } else {
        let free: Vec<usize> = board.empty_cells().collect();
        free.into_iter()
            .map(|index| {
                let next = rules::apply_move(&board, index, to_move).unwrap();
                never_loses(next, to_move.opponent(), engine)
            })
            .sum()
    }
}

#[test]
fn test_reply_to_center_is_a_corner() {
    let board: Board = ".../.X./...".parse().unwrap();
    assert_eq!(board.get(4), Some(Cell::Occupied(Mark::X)));

    let reply = best_move(&board, Mark::O).unwrap();
    assert!([0, 2, 6, 8].contains(&reply), "edge reply {reply}");
}

#[test]
fn test_completes_own_row_over_blocking() {
    let board: Board = "XX./OO./...".parse().unwrap();
    assert_eq!(best_move(&board, Mark::X), Some(2));
}

#[test]
fn test_blocks_when_it_cannot_win() {
    let board: Board = "XX./O../...".parse().unwrap();
    assert_eq!(best_move(&board, Mark::O), Some(2));
}

#[test]
fn test_never_picks_occupied_cell_and_only_none_when_full() {
    let mut seen = HashSet::new();
    reachable(Board::new(), Mark::X, &mut seen);
    // Every position reachable in play, terminal ones included.
    assert_eq!(seen.len(), 5478);

    for board in &seen {
        let Some(mark) = rules::next_mark(board) else {
            assert!(rules::is_full(board));
            assert_eq!(best_move(board, Mark::X), None);
            continue;
        };
        let index = best_move(board, mark).expect("free cell exists");
        assert!(rules::is_cell_free(board, index), "picked {index} on\n{board}");
    }
}

#[test]
fn test_deterministic() {
    let boards = [
        Board::new(),
        "X........".parse().unwrap(),
        "X.O.X....".parse().unwrap(),
        "XO.OX....".parse().unwrap(),
    ];
    for board in boards {
        let mark = rules::next_mark(&board).unwrap();
        let selector = MoveSelector::new(mark);
        let first = selector.best_move(&board);
        assert_eq!(first, selector.best_move(&board));
        assert_eq!(first, best_move(&board, mark));
        assert_eq!(
            selector.score(&board, 0, true),
            selector.score(&board, 0, true)
        );
    }
}

#[test]
fn test_never_loses_as_x() {
    let games = never_loses(Board::new(), Mark::X, Mark::X);
    assert!(games > 0);
}

#[test]
fn test_never_loses_as_o() {
    let games = never_loses(Board::new(), Mark::X, Mark::O);
    assert!(games > 0);
}

#[test]
fn test_self_play_is_a_draw() {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    while rules::is_terminal(&board).is_none() {
        let index = best_move(&board, to_move).unwrap();
        board = rules::apply_move(&board, index, to_move).unwrap();
        to_move = to_move.opponent();
    }
    assert_eq!(rules::is_terminal(&board), Some(Outcome::Draw), "\n{board}");
}

#[test]
fn test_empty_board_opening_is_first_corner() {
    // Every opening draws; ties go to the lowest index.
    assert_eq!(best_move(&Board::new(), Mark::X), Some(0));
}
