//! Frame sources: algorithms turned into lazy frame sequences
//!
//! Each source is a hand-written state machine. A call to
//! [`FrameSource::next_frame`] advances the algorithm by exactly one step and
//! returns the frame for it, so the driving loop regains control between
//! every step (to pace, render, or abandon the run).
//!
//! - [`search`]: linear scan and range (binary) search
//! - [`sorting`]: bubble, selection, insertion, merge, quick, heap sort
//! - [`traversal`]: BFS, DFS, Dijkstra
//! - [`dp`]: Floyd–Warshall, 0/1 knapsack, LCS, matrix chain
//!
//! Constraint searches live in [`crate::backtrack`] and implement the same trait.
//!
//! Sources own private copies of their inputs. They are not restartable: once
//! the terminal frame has been returned, `next_frame` returns `None`.

pub mod dp;
pub mod search;
pub mod sorting;
pub mod traversal;

use crate::frame::{Frame, FrameKind};
use crate::session::RunContext;

pub trait FrameSource {
    /// Overlay schema of every frame this source emits
    fn kind(&self) -> FrameKind;

    /// Advance one step. `None` once the run is over (or was abandoned).
    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn kind(&self) -> FrameKind {
        (**self).kind()
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        (**self).next_frame(ctx)
    }
}

/// Iterator over a source's frames
pub struct Frames<'a, S: FrameSource + ?Sized> {
    source: &'a mut S,
    ctx: &'a mut RunContext,
}

impl<S: FrameSource + ?Sized> Iterator for Frames<'_, S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.source.next_frame(self.ctx)
    }
}

/// Borrow a source as an iterator driven by `ctx`
pub fn frames<'a, S: FrameSource + ?Sized>(
    source: &'a mut S,
    ctx: &'a mut RunContext,
) -> Frames<'a, S> {
    Frames { source, ctx }
}

/// Drain a source with a fresh run context
pub fn run_to_end<S: FrameSource + ?Sized>(source: &mut S) -> Vec<Frame> {
    let mut ctx = RunContext::new();
    frames(source, &mut ctx).collect()
}
