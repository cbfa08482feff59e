//! Exhaustive minimax move selection.
//!
//! The 3x3 game tree has fewer than 9! leaves, so the search always runs
//! to the end of the game: no depth limit, no pruning, no caching.
//! Terminal scores are offset by search depth so that the selector
//! prefers quick wins and drawn-out losses.

use crate::{Board, CELLS, Cell, Mark, rules};
use tracing::{debug, instrument};

/// Score of a win found `depth` plies below the evaluated board.
const WIN: i32 = 10;

/// Picks moves for one mark by searching the full game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSelector {
    mark: Mark,
}

impl MoveSelector {
    /// Creates a selector optimizing for `mark`.
    pub fn new(mark: Mark) -> Self {
        Self { mark }
    }

    /// The mark this selector plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the best empty cell for this selector's mark.
    ///
    /// Cells are tried in increasing index order and only a strictly
    /// better score replaces the current choice, so ties go to the lowest
    /// index. Returns `None` iff the board is full.
    #[instrument(skip(self, board), fields(mark = %self.mark, free = CELLS - board.occupied()))]
    pub fn best_move(&self, board: &Board) -> Option<usize> {
        let mut scratch = *board;
        let mut best: Option<(usize, i32)> = None;

        for index in board.empty_cells() {
            scratch.put(index, Cell::Occupied(self.mark));
            let score = self.search(&mut scratch, 0, false);
            scratch.put(index, Cell::Empty);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        debug!(?best, "Search complete");
        best.map(|(index, _)| index)
    }

    /// Minimax value of `board` from this selector's point of view.
    ///
    /// `maximizing` says whose turn it is on `board`: this selector's mark
    /// when true, the opponent's otherwise. A win is worth `10 - depth`, a
    /// loss `depth - 10`, a draw `0`.
    pub fn score(&self, board: &Board, depth: i32, maximizing: bool) -> i32 {
        let mut scratch = *board;
        self.search(&mut scratch, depth, maximizing)
    }

    // Mutates `board` while recursing and restores every cell it touches.
    fn search(&self, board: &mut Board, depth: i32, maximizing: bool) -> i32 {
        match rules::winner(board) {
            Some(mark) if mark == self.mark => return WIN - depth,
            Some(_) => return depth - WIN,
            None => {}
        }
        if rules::is_full(board) {
            return 0;
        }

        let mover = if maximizing {
            self.mark
        } else {
            self.mark.opponent()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in 0..CELLS {
            if board.get(index) != Some(Cell::Empty) {
                continue;
            }
            board.put(index, Cell::Occupied(mover));
            let score = self.search(board, depth + 1, !maximizing);
            board.put(index, Cell::Empty);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

/// Best empty cell for `mark` on `board`; see [`MoveSelector::best_move`].
pub fn best_move(board: &Board, mark: Mark) -> Option<usize> {
    MoveSelector::new(mark).best_move(board)
}

/// Minimax value of `board` for `mark`; see [`MoveSelector::score`].
pub fn score(board: &Board, mark: Mark, depth: i32, maximizing: bool) -> i32 {
    MoveSelector::new(mark).score(board, depth, maximizing)
}
