//! N-Queens: one queen per row, placed top-down, columns tried left to right

use super::SearchProblem;
use crate::errors::{EngineError, EngineResult};
use crate::frame::{Action, Mark, Position, PrimaryState, Success};

#[derive(Debug, Clone)]
pub struct NQueens {
    n: usize,
    /// Column of the queen in each placed row
    columns: Vec<usize>,
}

impl NQueens {
    pub fn new(n: usize) -> EngineResult<Self> {
        if n == 0 {
            return Err(EngineError::invalid_input("board size must be at least 1"));
        }
        Ok(NQueens {
            n,
            columns: Vec::with_capacity(n),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Whether a queen at (row, col) is attacked by any queen above it
    fn is_safe(&self, row: usize, col: usize) -> bool {
        self.columns
            .iter()
            .enumerate()
            .all(|(r, &c)| c != col && row.abs_diff(r) != col.abs_diff(c))
    }
}

impl SearchProblem for NQueens {
    type Position = usize;
    type Choice = usize;
    type State = Vec<usize>;

    fn state(&self) -> &Vec<usize> {
        &self.columns
    }

    fn is_goal(&self) -> bool {
        self.columns.len() == self.n
    }

    fn position(&self) -> usize {
        self.columns.len()
    }

    fn candidate(&self, _row: usize, index: usize) -> Option<usize> {
        (index < self.n).then_some(index)
    }

    fn accepts(&self, row: usize, col: usize) -> bool {
        self.is_safe(row, col)
    }

    fn commit(&mut self, _row: usize, col: usize) {
        self.columns.push(col);
    }

    fn rollback(&mut self, _row: usize, col: usize) {
        let removed = self.columns.pop();
        debug_assert_eq!(removed, Some(col));
    }

    fn render(&self) -> PrimaryState {
        let mut board = vec![vec![0; self.n]; self.n];
        for (row, &col) in self.columns.iter().enumerate() {
            board[row][col] = 1;
        }
        PrimaryState::Grid(board)
    }

    fn focus(&self, row: usize, col: usize) -> Vec<Mark> {
        vec![Mark::Cell { row, col }]
    }

    fn cursor(&self, row: usize, col: usize) -> Position {
        Position::Cell { row, col }
    }

    fn describe(&self, action: Action, row: usize, col: usize) -> String {
        match action {
            Action::Try => format!("Trying queen at row {}, col {}", row, col),
            Action::Commit => format!("Placed queen at row {}, col {}", row, col),
            Action::Rollback => format!("Backtracking: removed queen from row {}, col {}", row, col),
        }
    }

    fn solution(&self) -> Success {
        Success::Placement {
            columns: self.columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrack::Backtracker;
    use crate::frame::{Failure, Outcome};
    use crate::sources::run_to_end;

    #[test]
    fn four_queens_first_solution() {
        let frames = run_to_end(&mut Backtracker::new(NQueens::new(4).expect("size")));
        assert_eq!(
            frames.last().and_then(|f| f.outcome.clone()),
            Some(Outcome::Success(Success::Placement {
                columns: vec![1, 3, 0, 2]
            }))
        );
    }

    #[test]
    fn three_queens_has_no_solution() {
        let frames = run_to_end(&mut Backtracker::new(NQueens::new(3).expect("size")));
        assert_eq!(
            frames.last().and_then(|f| f.outcome.clone()),
            Some(Outcome::Failure(Failure::Exhausted))
        );
    }

    #[test]
    fn diagonal_attack_is_rejected() {
        let mut queens = NQueens::new(4).expect("size");
        queens.commit(0, 0);
        assert!(!queens.accepts(1, 1));
        assert!(!queens.accepts(1, 0));
        assert!(queens.accepts(1, 2));
    }

    #[test]
    fn zero_board_is_invalid() {
        assert!(NQueens::new(0).is_err());
    }
}
