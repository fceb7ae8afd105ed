//! Subset sum: for each value in order, include it, then try excluding it

use super::SearchProblem;
use crate::errors::{EngineError, EngineResult};
use crate::frame::{Action, Mark, Position, PrimaryState, Success};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Include,
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetState {
    pub chosen: Vec<bool>,
    /// Next index to decide
    pub index: usize,
    pub sum: i64,
}

#[derive(Debug, Clone)]
pub struct SubsetSum {
    values: Vec<i64>,
    target: i64,
    state: SubsetState,
}

impl SubsetSum {
    /// Values must be non-negative so an overshoot can be pruned
    pub fn new(values: &[i64], target: i64) -> EngineResult<Self> {
        if let Some(bad) = values.iter().find(|&&v| v < 0) {
            return Err(EngineError::invalid_input(format!(
                "subset sum values must be non-negative, got {}",
                bad
            )));
        }
        Ok(SubsetSum {
            values: values.to_vec(),
            target,
            state: SubsetState {
                chosen: vec![false; values.len()],
                index: 0,
                sum: 0,
            },
        })
    }
}

impl SearchProblem for SubsetSum {
    type Position = usize;
    type Choice = Pick;
    type State = SubsetState;

    fn state(&self) -> &SubsetState {
        &self.state
    }

    fn is_goal(&self) -> bool {
        self.state.sum == self.target
    }

    fn is_dead_end(&self) -> bool {
        self.state.sum > self.target || self.state.index >= self.values.len()
    }

    fn position(&self) -> usize {
        self.state.index
    }

    fn candidate(&self, _at: usize, index: usize) -> Option<Pick> {
        [Pick::Include, Pick::Exclude].get(index).copied()
    }

    fn accepts(&self, _at: usize, _pick: Pick) -> bool {
        true
    }

    fn commit(&mut self, at: usize, pick: Pick) {
        if pick == Pick::Include {
            self.state.chosen[at] = true;
            self.state.sum += self.values[at];
        }
        self.state.index += 1;
    }

    fn rollback(&mut self, at: usize, pick: Pick) {
        if pick == Pick::Include {
            self.state.chosen[at] = false;
            self.state.sum -= self.values[at];
        }
        self.state.index -= 1;
    }

    fn render(&self) -> PrimaryState {
        PrimaryState::Selection {
            values: self.values.clone(),
            chosen: self.state.chosen.clone(),
        }
    }

    fn focus(&self, at: usize, _pick: Pick) -> Vec<Mark> {
        vec![Mark::Index(at)]
    }

    fn cursor(&self, at: usize, _pick: Pick) -> Position {
        Position::Linear(at as f64)
    }

    fn describe(&self, action: Action, at: usize, pick: Pick) -> String {
        let value = self.values[at];
        let verb = match pick {
            Pick::Include => "including",
            Pick::Exclude => "excluding",
        };
        match action {
            Action::Try => format!("Trying {} {} (sum {})", verb, value, self.state.sum),
            Action::Commit => format!("Committed {} {} (sum {})", verb, value, self.state.sum),
            Action::Rollback => format!("Undo {} {} (sum {})", verb, value, self.state.sum),
        }
    }

    fn solution(&self) -> Success {
        let indices: Vec<usize> = (0..self.values.len())
            .filter(|&i| self.state.chosen[i])
            .collect();
        let values = indices.iter().map(|&i| self.values[i]).collect();
        Success::Subset { indices, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshoot_is_a_dead_end() {
        let mut subset = SubsetSum::new(&[5, 5], 4).expect("valid");
        assert!(!subset.is_dead_end());
        subset.commit(0, Pick::Include);
        assert!(subset.is_dead_end());
        subset.rollback(0, Pick::Include);
        assert_eq!(subset.state().sum, 0);
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(SubsetSum::new(&[1, -2], 3).is_err());
    }
}
