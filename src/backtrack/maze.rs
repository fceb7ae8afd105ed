//! Rat in a maze: enter at the top-left, move down or right, reach the bottom-right
//!
//! Grid codes: 0 wall, 1 open, 2 on the current path. Committing a move closes
//! the cell and appends it to the path; rolling back pops and reopens it.

use super::SearchProblem;
use crate::errors::{EngineError, EngineResult};
use crate::frame::{Action, Mark, Position, PrimaryState, Success};

pub const WALL: i64 = 0;
pub const OPEN: i64 = 1;
pub const PATH: i64 = 2;

/// The maze used by the default scenario
pub const CLASSIC_MAZE: [[i64; 4]; 4] = [[1, 0, 0, 0], [1, 1, 0, 1], [0, 1, 0, 0], [1, 1, 1, 1]];

type Cell = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeState {
    pub grid: Vec<Vec<i64>>,
    pub path: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct Maze {
    state: MazeState,
}

impl Maze {
    pub fn new(grid: Vec<Vec<i64>>) -> EngineResult<Self> {
        let cols = grid.first().map_or(0, Vec::len);
        if cols == 0 || grid.iter().any(|row| row.len() != cols) {
            return Err(EngineError::invalid_input("maze must be a non-empty rectangle"));
        }
        if grid.iter().flatten().any(|&v| v != WALL && v != OPEN) {
            return Err(EngineError::invalid_input("maze cells must be 0 (wall) or 1 (open)"));
        }
        Ok(Maze {
            state: MazeState {
                grid,
                path: Vec::new(),
            },
        })
    }

    pub fn classic() -> Self {
        Maze {
            state: MazeState {
                grid: CLASSIC_MAZE.iter().map(|row| row.to_vec()).collect(),
                path: Vec::new(),
            },
        }
    }

    fn exit(&self) -> Cell {
        let rows = self.state.grid.len();
        let cols = self.state.grid.first().map_or(0, Vec::len);
        (rows.saturating_sub(1), cols.saturating_sub(1))
    }

    fn is_open(&self, (row, col): Cell) -> bool {
        self.state
            .grid
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&v| v == OPEN)
    }
}

impl SearchProblem for Maze {
    /// `None` before the rat has entered
    type Position = Option<Cell>;
    /// Cell to step into
    type Choice = Cell;
    type State = MazeState;

    fn state(&self) -> &MazeState {
        &self.state
    }

    fn is_goal(&self) -> bool {
        self.state.path.last() == Some(&self.exit())
    }

    fn position(&self) -> Option<Cell> {
        self.state.path.last().copied()
    }

    fn candidate(&self, at: Option<Cell>, index: usize) -> Option<Cell> {
        match (at, index) {
            (None, 0) => Some((0, 0)),
            (Some((row, col)), 0) => Some((row + 1, col)),
            (Some((row, col)), 1) => Some((row, col + 1)),
            _ => None,
        }
    }

    fn accepts(&self, _at: Option<Cell>, to: Cell) -> bool {
        self.is_open(to)
    }

    fn commit(&mut self, _at: Option<Cell>, (row, col): Cell) {
        self.state.grid[row][col] = PATH;
        self.state.path.push((row, col));
    }

    fn rollback(&mut self, _at: Option<Cell>, (row, col): Cell) {
        let popped = self.state.path.pop();
        debug_assert_eq!(popped, Some((row, col)));
        self.state.grid[row][col] = OPEN;
    }

    fn render(&self) -> PrimaryState {
        PrimaryState::Grid(self.state.grid.clone())
    }

    fn focus(&self, _at: Option<Cell>, (row, col): Cell) -> Vec<Mark> {
        vec![Mark::Cell { row, col }]
    }

    fn cursor(&self, _at: Option<Cell>, (row, col): Cell) -> Position {
        Position::Cell { row, col }
    }

    fn describe(&self, action: Action, at: Option<Cell>, (row, col): Cell) -> String {
        let direction = match at {
            None => "enter",
            Some((r, _)) if r < row => "down",
            Some(_) => "right",
        };
        match action {
            Action::Try => format!("Trying {} to ({}, {})", direction, row, col),
            Action::Commit => format!("Moved {} to ({}, {})", direction, row, col),
            Action::Rollback => format!("Dead end: backing out of ({}, {})", row, col),
        }
    }

    fn solution(&self) -> Success {
        Success::Path {
            cells: self.state.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let maze = Maze::classic();
        assert!(!maze.accepts(Some((3, 3)), (4, 3)));
        assert!(!maze.accepts(Some((0, 3)), (0, 4)));
        assert!(maze.accepts(None, (0, 0)));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(Maze::new(vec![vec![1, 3]]).is_err());
        assert!(Maze::new(vec![vec![1], vec![1, 1]]).is_err());
        assert!(Maze::new(Vec::new()).is_err());
    }
}
