//! Searching: linear scan and range (binary) search
//!
//! Both searches end with a short lift animation on a hit: cosmetic frames
//! carrying a `lift` pointer, followed by the terminal frame. Binary search
//! additionally slides its pointers between probes with interpolated cosmetic
//! frames.

use super::FrameSource;
use crate::frame::{
    Failure, Frame, FrameKind, Mark, Metrics, Outcome, Pointers, Position, PrimaryState, Success,
};
use crate::pacing::{interpolate, lift_offsets, SLIDE_STEPS};
use crate::session::RunContext;

/// Lift animation shared by both searches
#[derive(Debug, Clone)]
struct Lift {
    index: usize,
    offsets: Vec<u32>,
    next: usize,
}

impl Lift {
    fn new(index: usize) -> Self {
        Lift {
            index,
            offsets: lift_offsets().collect(),
            next: 0,
        }
    }

    /// Next lift offset, or `None` when the animation is over
    fn advance(&mut self) -> Option<u32> {
        let offset = self.offsets.get(self.next).copied()?;
        self.next += 1;
        Some(offset)
    }
}

#[derive(Debug, Clone)]
enum ScanPhase {
    Checking(usize),
    Lifting(Lift),
    Done,
}

/// Linear search over an unsorted sequence
#[derive(Debug, Clone)]
pub struct LinearScan {
    values: Vec<i64>,
    target: i64,
    phase: ScanPhase,
    metrics: Metrics,
}

impl LinearScan {
    pub fn new(values: &[i64], target: i64) -> Self {
        LinearScan {
            values: values.to_vec(),
            target,
            phase: ScanPhase::Checking(0),
            metrics: Metrics::default(),
        }
    }

    fn frame(&self) -> Frame {
        Frame::logical(FrameKind::LinearScan, PrimaryState::Sequence(self.values.clone()))
            .metrics(self.metrics)
    }
}

impl FrameSource for LinearScan {
    fn kind(&self) -> FrameKind {
        FrameKind::LinearScan
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        let frame = match &mut self.phase {
            ScanPhase::Checking(i) => {
                let i = *i;
                if i >= self.values.len() {
                    self.phase = ScanPhase::Done;
                    self.frame()
                        .message(format!("{} not found", self.target))
                        .finish(Outcome::Failure(Failure::NotFound))
                } else {
                    self.metrics.comparisons += 1;
                    self.phase = if self.values[i] == self.target {
                        ScanPhase::Lifting(Lift::new(i))
                    } else {
                        ScanPhase::Checking(i + 1)
                    };
                    self.frame()
                        .highlight([Mark::Index(i)])
                        .pointer("i", Position::Linear(i as f64))
                        .message(format!("Checking index {}...", i))
                        .cue(crate::frame::Cue::Click)
                }
            }
            ScanPhase::Lifting(lift) => {
                let index = lift.index;
                match lift.advance() {
                    Some(offset) => {
                        Frame::cosmetic(FrameKind::LinearScan, PrimaryState::Sequence(self.values.clone()))
                            .metrics(self.metrics)
                            .highlight([Mark::Index(index)])
                            .pointer("i", Position::Linear(index as f64))
                            .pointer("lift", Position::Linear(f64::from(offset)))
                            .message(format!("Found {} at index {}", self.target, index))
                    }
                    None => {
                        self.phase = ScanPhase::Done;
                        self.frame()
                            .highlight([Mark::Index(index)])
                            .pointer("i", Position::Linear(index as f64))
                            .message(format!("Found {} at index {}", self.target, index))
                            .finish(Outcome::Success(Success::Found { index }))
                    }
                }
            }
            ScanPhase::Done => return None,
        };
        Some(ctx.stamp(frame))
    }
}

#[derive(Debug, Clone)]
struct Slide {
    /// Interpolated (low, mid, high) positions, one entry per cosmetic frame
    path: Vec<[f64; 3]>,
    next: usize,
    discarded: (usize, usize),
    message: String,
}

#[derive(Debug, Clone)]
enum RangePhase {
    Probe,
    Sliding(Slide),
    Lifting(Lift),
    Done,
}

/// Binary search over a sorted private copy of the input
#[derive(Debug, Clone)]
pub struct RangeSearch {
    values: Vec<i64>,
    target: i64,
    low: isize,
    high: isize,
    /// Pointer positions shown by the previous frame, where slides start
    shown: [f64; 3],
    phase: RangePhase,
    metrics: Metrics,
}

impl RangeSearch {
    /// Sorts a copy of `values` up front; the sort itself is not visualized
    pub fn new(values: &[i64], target: i64) -> Self {
        let mut values = values.to_vec();
        values.sort_unstable();
        let low = 0isize;
        let high = values.len() as isize - 1;
        RangeSearch {
            values,
            target,
            low,
            high,
            shown: [low as f64, ((low + high) / 2) as f64, high as f64],
            phase: RangePhase::Probe,
            metrics: Metrics::default(),
        }
    }

    /// The sorted copy the search runs over
    pub fn sorted(&self) -> &[i64] {
        &self.values
    }

    fn state(&self) -> PrimaryState {
        PrimaryState::Sequence(self.values.clone())
    }

    fn pointers_at(at: [f64; 3]) -> Pointers {
        Pointers::new()
            .with("low", Position::Linear(at[0]))
            .with("mid", Position::Linear(at[1]))
            .with("high", Position::Linear(at[2]))
    }

    fn start_slide(&mut self, to: [f64; 3], discarded: (usize, usize), message: String) {
        let lows = interpolate(self.shown[0], to[0], SLIDE_STEPS);
        let mids = interpolate(self.shown[1], to[1], SLIDE_STEPS);
        let highs = interpolate(self.shown[2], to[2], SLIDE_STEPS);
        let path = (0..SLIDE_STEPS)
            .map(|t| [lows[t], mids[t], highs[t]])
            .collect();
        self.shown = to;
        self.phase = RangePhase::Sliding(Slide {
            path,
            next: 0,
            discarded,
            message,
        });
    }

    fn probe(&mut self) -> Frame {
        if self.low > self.high {
            self.phase = RangePhase::Done;
            return Frame::logical(FrameKind::RangeSearch, self.state())
                .metrics(self.metrics)
                .message(format!("{} not found", self.target))
                .finish(Outcome::Failure(Failure::NotFound));
        }

        let (low, high) = (self.low, self.high);
        let mid = (low + high) / 2;
        let m = mid as usize;
        self.metrics.comparisons += 1;
        let shown = [low as f64, mid as f64, high as f64];

        let frame = Frame::logical(FrameKind::RangeSearch, self.state())
            .metrics(self.metrics)
            .highlight([Mark::Index(m)])
            .pointers(Self::pointers_at(shown))
            .message(format!("Checking mid index {}...", m))
            .cue(crate::frame::Cue::Click);
        self.shown = shown;

        let probe = self.values[m];
        if probe == self.target {
            self.phase = RangePhase::Lifting(Lift::new(m));
        } else if probe < self.target {
            self.low = mid + 1;
            self.start_slide(
                [(mid + 1) as f64, mid as f64, high as f64],
                (low as usize, m),
                format!("{} < {}, moving right...", probe, self.target),
            );
        } else {
            self.high = mid - 1;
            self.start_slide(
                [low as f64, mid as f64, (mid - 1) as f64],
                (m, high as usize),
                format!("{} > {}, moving left...", probe, self.target),
            );
        }
        frame
    }
}

impl FrameSource for RangeSearch {
    fn kind(&self) -> FrameKind {
        FrameKind::RangeSearch
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        loop {
            if matches!(self.phase, RangePhase::Probe) {
                let frame = self.probe();
                return Some(ctx.stamp(frame));
            }
            let frame = match &mut self.phase {
                RangePhase::Probe => unreachable!("probe handled above"),
                RangePhase::Sliding(slide) => match slide.path.get(slide.next).copied() {
                    Some(at) => {
                        slide.next += 1;
                        let (from, to) = slide.discarded;
                        let message = slide.message.clone();
                        Frame::cosmetic(FrameKind::RangeSearch, self.state())
                            .metrics(self.metrics)
                            .highlight((from..=to).map(Mark::Index))
                            .pointers(Self::pointers_at(at))
                            .message(message)
                    }
                    None => {
                        self.phase = RangePhase::Probe;
                        continue;
                    }
                },
                RangePhase::Lifting(lift) => {
                    let index = lift.index;
                    let offset = lift.advance();
                    let frame = Frame::logical(FrameKind::RangeSearch, self.state())
                        .metrics(self.metrics)
                        .highlight([Mark::Index(index)])
                        .pointers(Self::pointers_at(self.shown))
                        .message(format!("Found {} at index {}", self.target, index));
                    match offset {
                        Some(offset) => Frame {
                            step: crate::frame::StepKind::Cosmetic,
                            ..frame.pointer("lift", Position::Linear(f64::from(offset)))
                        },
                        None => {
                            self.phase = RangePhase::Done;
                            frame.finish(Outcome::Success(Success::Found { index }))
                        }
                    }
                }
                RangePhase::Done => return None,
            };
            return Some(ctx.stamp(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::run_to_end;

    #[test]
    fn linear_scan_on_empty_input_is_not_found() {
        let frames = run_to_end(&mut LinearScan::new(&[], 3));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].outcome, Some(Outcome::Failure(Failure::NotFound)));
    }

    #[test]
    fn range_search_slide_ends_on_new_bounds() {
        let frames = run_to_end(&mut RangeSearch::new(&[1, 2, 3, 4, 5, 6, 7], 7));
        let slide: Vec<&Frame> = frames.iter().filter(|f| f.is_cosmetic() && f.pointers.get("lift").is_none()).collect();
        assert_eq!(slide.len(), 2 * SLIDE_STEPS);
        // First slide moves low from 0 to mid + 1 = 4
        assert_eq!(slide[SLIDE_STEPS - 1].pointers.linear("low"), Some(4.0));
        assert!(slide[0].pointers.linear("low").is_some_and(|low| low > 0.0 && low < 4.0));
    }

    #[test]
    fn range_search_reports_index_in_sorted_copy() {
        let mut source = RangeSearch::new(&[50, 10, 40, 20, 30], 40);
        assert_eq!(source.sorted(), &[10, 20, 30, 40, 50]);
        let last = run_to_end(&mut source).pop().expect("terminal frame");
        assert_eq!(last.outcome, Some(Outcome::Success(Success::Found { index: 3 })));
    }
}
