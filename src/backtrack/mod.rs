//! Backtracking search with an explicit stack
//!
//! A [`SearchProblem`] describes one puzzle: its mutable state, the candidate
//! choices at each position, how to apply and undo a choice, and how to draw
//! itself. The [`Backtracker`] drives any such problem one transition per frame:
//!
//! ```text
//! Enter ──goal──────────────▶ Solved (terminal)
//!   │ ──dead end────────────▶ Unwind
//!   ▼
//! Try(candidate) ──rejected─▶ Try(next candidate)
//!   │ ──accepted────────────▶ Commit ─▶ Enter (one level deeper)
//!   │ ──no candidates left──▶ Unwind
//! Unwind ──stack empty──────▶ Exhausted (terminal)
//!   └──────────────────────▶ Rollback parent's choice ─▶ Try
//! ```
//!
//! Try frames are emitted before the validity check, Commit frames after the
//! mutation and Rollback frames after the undo. Every node on the stack keeps a
//! copy of the state from before its commit; the rollback is checked against it
//! with `debug_assert_eq!`.
//!
//! - [`queens`]: N-Queens
//! - [`sudoku`]: 9x9 Sudoku
//! - [`maze`]: rat in a maze (down and right moves)
//! - [`subset`]: subset sum

pub mod maze;
pub mod queens;
pub mod subset;
pub mod sudoku;

pub use maze::Maze;
pub use queens::NQueens;
pub use subset::SubsetSum;
pub use sudoku::Sudoku;

use crate::frame::{
    Action, Cue, Failure, Frame, FrameKind, Mark, Metrics, Outcome, Position, PrimaryState, Success,
};
use crate::session::RunContext;
use crate::sources::FrameSource;
use std::fmt::Debug;

/// A puzzle the [`Backtracker`] can search
pub trait SearchProblem {
    /// Where the search currently stands (row, cell, index, ...)
    type Position: Copy + Debug;
    /// One candidate decision at a position
    type Choice: Copy + Debug;
    /// Everything a commit mutates; compared after each rollback
    type State: Clone + PartialEq + Debug;

    fn state(&self) -> &Self::State;

    fn is_goal(&self) -> bool;

    /// Prune this branch without trying any candidate
    fn is_dead_end(&self) -> bool {
        false
    }

    /// Current position. Only asked when the state is neither a goal nor a dead end.
    fn position(&self) -> Self::Position;

    /// The `index`-th candidate at `at`, or `None` once candidates run out
    fn candidate(&self, at: Self::Position, index: usize) -> Option<Self::Choice>;

    fn accepts(&self, at: Self::Position, choice: Self::Choice) -> bool;

    fn commit(&mut self, at: Self::Position, choice: Self::Choice);

    /// Exact inverse of [`commit`](SearchProblem::commit)
    fn rollback(&mut self, at: Self::Position, choice: Self::Choice);

    fn render(&self) -> PrimaryState;

    /// Marks to highlight while `choice` is tried, committed or undone
    fn focus(&self, at: Self::Position, choice: Self::Choice) -> Vec<Mark>;

    /// Where the `cursor` pointer sits for `choice`
    fn cursor(&self, at: Self::Position, choice: Self::Choice) -> Position;

    fn describe(&self, action: Action, at: Self::Position, choice: Self::Choice) -> String;

    /// Payload for the success frame
    fn solution(&self) -> Success;
}

/// One level of the explicit search stack
#[derive(Debug, Clone)]
struct Node<P: SearchProblem> {
    at: P::Position,
    /// Index of the next candidate to try
    next: usize,
    /// Choice this node descended with, and the state from before it
    committed: Option<(P::Choice, P::State)>,
}

#[derive(Debug, Clone, Copy)]
enum Cursor<C> {
    Enter,
    Try,
    Decide(C),
    Unwind,
    Done,
}

/// Explicit-stack backtracking driver
pub struct Backtracker<P: SearchProblem> {
    problem: P,
    stack: Vec<Node<P>>,
    cursor: Cursor<P::Choice>,
    metrics: Metrics,
}

impl<P: SearchProblem> Backtracker<P> {
    pub fn new(problem: P) -> Self {
        Backtracker {
            problem,
            stack: Vec::new(),
            cursor: Cursor::Enter,
            metrics: Metrics::default(),
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Current depth of the search stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn frame(&self, action: Action, depth: usize, at: P::Position, choice: P::Choice) -> Frame {
        Frame::logical(FrameKind::ConstraintSearch, self.problem.render())
            .highlight(self.problem.focus(at, choice))
            .pointer("cursor", self.problem.cursor(at, choice))
            .metrics(self.metrics)
            .message(self.problem.describe(action, at, choice))
            .trace(action, depth)
    }

    fn solved(&mut self) -> Frame {
        self.cursor = Cursor::Done;
        let outcome = Outcome::Success(self.problem.solution());
        tracing::debug!(
            comparisons = self.metrics.comparisons,
            depth = self.stack.len(),
            "search solved"
        );
        Frame::logical(FrameKind::ConstraintSearch, self.problem.render())
            .metrics(self.metrics)
            .message(format!("Solved: {}", outcome))
            .finish(outcome)
    }

    fn exhausted(&mut self) -> Frame {
        self.cursor = Cursor::Done;
        tracing::debug!(comparisons = self.metrics.comparisons, "search exhausted");
        Frame::logical(FrameKind::ConstraintSearch, self.problem.render())
            .metrics(self.metrics)
            .message("No solution")
            .finish(Outcome::Failure(Failure::Exhausted))
    }
}

impl<P: SearchProblem> FrameSource for Backtracker<P> {
    fn kind(&self) -> FrameKind {
        FrameKind::ConstraintSearch
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        loop {
            if matches!(self.cursor, Cursor::Done) {
                return None;
            }
            if ctx.should_quit() {
                tracing::debug!(depth = self.stack.len(), "search abandoned");
                self.cursor = Cursor::Done;
                self.stack.clear();
                return None;
            }

            match self.cursor {
                Cursor::Done => return None,
                Cursor::Enter => {
                    if self.problem.is_goal() {
                        let frame = self.solved();
                        return Some(ctx.stamp(frame));
                    }
                    if self.problem.is_dead_end() {
                        self.cursor = Cursor::Unwind;
                        continue;
                    }
                    self.stack.push(Node {
                        at: self.problem.position(),
                        next: 0,
                        committed: None,
                    });
                    self.cursor = Cursor::Try;
                }
                Cursor::Try => {
                    let depth = self.stack.len().saturating_sub(1);
                    let Some(node) = self.stack.last_mut() else {
                        self.cursor = Cursor::Unwind;
                        continue;
                    };
                    let at = node.at;
                    match self.problem.candidate(at, node.next) {
                        Some(choice) => {
                            node.next += 1;
                            self.cursor = Cursor::Decide(choice);
                            let frame = self.frame(Action::Try, depth, at, choice);
                            return Some(ctx.stamp(frame));
                        }
                        None => {
                            self.stack.pop();
                            self.cursor = Cursor::Unwind;
                        }
                    }
                }
                Cursor::Decide(choice) => {
                    let depth = self.stack.len().saturating_sub(1);
                    let Some(node) = self.stack.last_mut() else {
                        self.cursor = Cursor::Unwind;
                        continue;
                    };
                    let at = node.at;
                    self.metrics.comparisons += 1;
                    if !self.problem.accepts(at, choice) {
                        self.cursor = Cursor::Try;
                        continue;
                    }

                    node.committed = Some((choice, self.problem.state().clone()));
                    self.problem.commit(at, choice);
                    self.metrics.writes += 1;
                    self.cursor = Cursor::Enter;
                    let frame = self.frame(Action::Commit, depth, at, choice).cue(Cue::Click);
                    return Some(ctx.stamp(frame));
                }
                Cursor::Unwind => {
                    let depth = self.stack.len().saturating_sub(1);
                    let Some(node) = self.stack.last_mut() else {
                        let frame = self.exhausted();
                        return Some(ctx.stamp(frame));
                    };
                    let at = node.at;
                    let Some((choice, before)) = node.committed.take() else {
                        // Nothing to undo at this level
                        self.stack.pop();
                        continue;
                    };

                    self.problem.rollback(at, choice);
                    debug_assert_eq!(
                        self.problem.state(),
                        &before,
                        "rollback did not restore the pre-commit state"
                    );
                    self.metrics.writes += 1;
                    self.cursor = Cursor::Try;
                    let frame = self.frame(Action::Rollback, depth, at, choice);
                    return Some(ctx.stamp(frame));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::run_to_end;

    /// Pick one bit per level; goal when the bits spell `want`
    struct Bits {
        want: Vec<bool>,
        picked: Vec<bool>,
    }

    impl SearchProblem for Bits {
        type Position = usize;
        type Choice = bool;
        type State = Vec<bool>;

        fn state(&self) -> &Vec<bool> {
            &self.picked
        }
        fn is_goal(&self) -> bool {
            self.picked == self.want
        }
        fn is_dead_end(&self) -> bool {
            self.picked.len() >= self.want.len()
        }
        fn position(&self) -> usize {
            self.picked.len()
        }
        fn candidate(&self, _at: usize, index: usize) -> Option<bool> {
            [false, true].get(index).copied()
        }
        fn accepts(&self, _at: usize, _choice: bool) -> bool {
            true
        }
        fn commit(&mut self, _at: usize, choice: bool) {
            self.picked.push(choice);
        }
        fn rollback(&mut self, _at: usize, _choice: bool) {
            self.picked.pop();
        }
        fn render(&self) -> PrimaryState {
            PrimaryState::Sequence(self.picked.iter().map(|&b| i64::from(b)).collect())
        }
        fn focus(&self, at: usize, _choice: bool) -> Vec<Mark> {
            vec![Mark::Index(at)]
        }
        fn cursor(&self, at: usize, _choice: bool) -> Position {
            Position::Linear(at as f64)
        }
        fn describe(&self, action: Action, at: usize, choice: bool) -> String {
            format!("{:?} {} at {}", action, choice, at)
        }
        fn solution(&self) -> Success {
            Success::Solved
        }
    }

    #[test]
    fn walks_every_leaf_before_the_goal() {
        let frames = run_to_end(&mut Backtracker::new(Bits {
            want: vec![true, true],
            picked: Vec::new(),
        }));
        let commits = frames
            .iter()
            .filter(|f| f.trace.map(|t| t.action) == Some(Action::Commit))
            .count();
        // 00, 01, 10, 11: two commits per leaf path minus the shared first levels
        assert_eq!(commits, 6);
        assert_eq!(frames.last().and_then(|f| f.outcome.clone()), Some(Outcome::Success(Success::Solved)));
    }

    #[test]
    fn unreachable_goal_exhausts_at_root() {
        let frames = run_to_end(&mut Backtracker::new(Bits {
            want: vec![true, true, true, true],
            picked: vec![false],
        }));
        let last = frames.last().expect("terminal");
        assert_eq!(last.outcome, Some(Outcome::Failure(Failure::Exhausted)));
        assert_eq!(last.cue, Some(Cue::Error));
    }

    #[test]
    fn quit_request_abandons_mid_search() {
        let mut search = Backtracker::new(Bits {
            want: vec![true; 6],
            picked: Vec::new(),
        });
        let mut ctx = RunContext::new();
        assert!(search.next_frame(&mut ctx).is_some());
        ctx.request_quit();
        assert!(search.next_frame(&mut ctx).is_none());
        assert!(search.next_frame(&mut RunContext::new()).is_none());
        assert_eq!(search.depth(), 0);
    }
}
