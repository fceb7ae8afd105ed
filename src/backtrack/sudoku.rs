//! 9x9 Sudoku, filling empty cells in row-major order with digits 1..=9

use super::SearchProblem;
use crate::errors::{EngineError, EngineResult};
use crate::frame::{Action, Mark, Position, PrimaryState, Success};

const SIZE: usize = 9;
const BOX: usize = 3;

/// The puzzle used by the default scenario (0 = empty)
pub const CLASSIC_PUZZLE: [[i64; 9]; 9] = [
    [0, 0, 0, 2, 6, 0, 7, 0, 1],
    [6, 8, 0, 0, 7, 0, 0, 9, 0],
    [1, 9, 0, 0, 0, 4, 5, 0, 0],
    [8, 2, 0, 1, 0, 0, 0, 4, 0],
    [0, 0, 4, 6, 0, 2, 9, 0, 0],
    [0, 5, 0, 0, 0, 3, 0, 2, 8],
    [0, 0, 9, 3, 0, 0, 0, 7, 4],
    [0, 4, 0, 0, 5, 0, 0, 3, 6],
    [7, 0, 3, 0, 1, 8, 0, 0, 0],
];

type Cell = (usize, usize);

#[derive(Debug, Clone)]
pub struct Sudoku {
    grid: Vec<Vec<i64>>,
    /// Empty cells of the starting grid, row-major
    blanks: Vec<Cell>,
    /// How many of `blanks` are currently filled
    filled: usize,
}

impl Sudoku {
    /// Validates shape, digit range, and that the givens do not already clash
    pub fn new(grid: Vec<Vec<i64>>) -> EngineResult<Self> {
        if grid.len() != SIZE || grid.iter().any(|row| row.len() != SIZE) {
            return Err(EngineError::invalid_input("sudoku grid must be 9x9"));
        }
        if let Some(bad) = grid.iter().flatten().find(|&&v| !(0..=9).contains(&v)) {
            return Err(EngineError::invalid_input(format!(
                "sudoku cell value {} outside 0..=9",
                bad
            )));
        }

        let mut sudoku = Sudoku::from_grid(grid);
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = sudoku.grid[row][col];
                if value == 0 {
                    continue;
                }
                sudoku.grid[row][col] = 0;
                let ok = sudoku.allows((row, col), value);
                sudoku.grid[row][col] = value;
                if !ok {
                    return Err(EngineError::invalid_input(format!(
                        "given {} at ({}, {}) conflicts with another given",
                        value, row, col
                    )));
                }
            }
        }
        Ok(sudoku)
    }

    pub fn classic() -> Self {
        Sudoku::from_grid(CLASSIC_PUZZLE.iter().map(|row| row.to_vec()).collect())
    }

    fn from_grid(grid: Vec<Vec<i64>>) -> Self {
        let blanks = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| grid[row][col] == 0)
            .collect();
        Sudoku {
            grid,
            blanks,
            filled: 0,
        }
    }

    pub fn grid(&self) -> &[Vec<i64>] {
        &self.grid
    }

    /// No repeat of `value` in the cell's row, column or box
    fn allows(&self, (row, col): Cell, value: i64) -> bool {
        let (box_row, box_col) = (row / BOX * BOX, col / BOX * BOX);
        (0..SIZE).all(|i| self.grid[row][i] != value && self.grid[i][col] != value)
            && (0..BOX).all(|r| (0..BOX).all(|c| self.grid[box_row + r][box_col + c] != value))
    }
}

impl SearchProblem for Sudoku {
    type Position = Cell;
    type Choice = i64;
    type State = Vec<Vec<i64>>;

    fn state(&self) -> &Vec<Vec<i64>> {
        &self.grid
    }

    fn is_goal(&self) -> bool {
        self.filled == self.blanks.len()
    }

    fn position(&self) -> Cell {
        self.blanks[self.filled]
    }

    fn candidate(&self, _at: Cell, index: usize) -> Option<i64> {
        (index < SIZE).then(|| index as i64 + 1)
    }

    fn accepts(&self, at: Cell, value: i64) -> bool {
        self.allows(at, value)
    }

    fn commit(&mut self, (row, col): Cell, value: i64) {
        self.grid[row][col] = value;
        self.filled += 1;
    }

    fn rollback(&mut self, (row, col): Cell, _value: i64) {
        self.grid[row][col] = 0;
        self.filled -= 1;
    }

    fn render(&self) -> PrimaryState {
        PrimaryState::Grid(self.grid.clone())
    }

    fn focus(&self, (row, col): Cell, _value: i64) -> Vec<Mark> {
        vec![Mark::Cell { row, col }]
    }

    fn cursor(&self, (row, col): Cell, _value: i64) -> Position {
        Position::Cell { row, col }
    }

    fn describe(&self, action: Action, (row, col): Cell, value: i64) -> String {
        match action {
            Action::Try => format!("Trying {} at ({}, {})", value, row, col),
            Action::Commit => format!("Placed {} at ({}, {})", value, row, col),
            Action::Rollback => format!("Backtracking: cleared {} from ({}, {})", value, row, col),
        }
    }

    fn solution(&self) -> Success {
        Success::Solved
    }
}
