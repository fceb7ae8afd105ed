//! Comparison sorts as step machines
//!
//! Every call to [`ComparisonSort::next_frame`](FrameSource::next_frame)
//! performs one comparison or one write and returns a frame showing the array
//! *after* that step, with the indices involved highlighted. Recursive sorts
//! (merge, quick, heap sift-down) keep their pending work in explicit state so
//! the machine can stop between any two steps.

use super::FrameSource;
use crate::frame::{Cue, Frame, FrameKind, Mark, Metrics, Outcome, PrimaryState, Success};
use crate::session::RunContext;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Heap => "Heap Sort",
        };
        f.write_str(name)
    }
}

/// What one step touched
struct Step {
    indices: Vec<usize>,
    message: String,
}

impl Step {
    fn new(indices: Vec<usize>, message: String) -> Self {
        Step { indices, message }
    }
}

#[derive(Debug, Clone)]
struct Bubble {
    pass: usize,
    j: usize,
}

impl Bubble {
    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        let n = values.len();
        loop {
            if self.pass >= n {
                return None;
            }
            if self.j + 1 >= n - self.pass {
                self.pass += 1;
                self.j = 0;
                continue;
            }
            let j = self.j;
            self.j += 1;
            metrics.comparisons += 1;
            let message = if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                metrics.writes += 2;
                format!("Swapped {} and {}", values[j + 1], values[j])
            } else {
                format!("{} <= {}, no swap", values[j], values[j + 1])
            };
            return Some(Step::new(vec![j, j + 1], message));
        }
    }
}

#[derive(Debug, Clone)]
struct Selection {
    i: usize,
    j: usize,
    min: usize,
}

impl Selection {
    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        let n = values.len();
        loop {
            if self.i + 1 >= n {
                return None;
            }
            if self.j < n {
                let (j, min) = (self.j, self.min);
                self.j += 1;
                metrics.comparisons += 1;
                if values[j] < values[min] {
                    self.min = j;
                }
                return Some(Step::new(
                    vec![min, j],
                    format!("Comparing {} with current min {}", values[j], values[min]),
                ));
            }

            let (i, min) = (self.i, self.min);
            self.i += 1;
            self.j = self.i + 1;
            self.min = self.i;
            if min != i {
                values.swap(i, min);
                metrics.writes += 2;
                return Some(Step::new(
                    vec![i, min],
                    format!("Moved min {} to index {}", values[i], i),
                ));
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Insertion {
    i: usize,
    /// Where the key currently in hand would land
    hole: usize,
    key: Option<i64>,
    moved: bool,
}

impl Insertion {
    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        loop {
            let key = match self.key {
                Some(key) => key,
                None => {
                    if self.i >= values.len() {
                        return None;
                    }
                    self.hole = self.i;
                    self.moved = false;
                    self.key = Some(values[self.i]);
                    continue;
                }
            };

            if self.hole > 0 {
                metrics.comparisons += 1;
                if values[self.hole - 1] > key {
                    values[self.hole] = values[self.hole - 1];
                    metrics.writes += 1;
                    self.hole -= 1;
                    self.moved = true;
                    return Some(Step::new(
                        vec![self.hole, self.hole + 1],
                        format!("Shifting {} right", values[self.hole]),
                    ));
                }
            }

            // Key found its place
            let hole = self.hole;
            values[hole] = key;
            self.key = None;
            self.i += 1;
            if self.moved {
                metrics.writes += 1;
                return Some(Step::new(vec![hole], format!("Inserted {} at index {}", key, hole)));
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Merging {
    left: Vec<i64>,
    right: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
}

#[derive(Debug, Clone)]
struct Merge {
    /// Merges (low, mid, high) in the order top-down recursion performs them
    plan: Vec<(usize, usize, usize)>,
    next: usize,
    active: Option<Merging>,
}

impl Merge {
    fn new(n: usize) -> Self {
        let mut plan = Vec::new();
        if n > 1 {
            plan_merges(0, n - 1, &mut plan);
        }
        Merge {
            plan,
            next: 0,
            active: None,
        }
    }

    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        loop {
            if let Some(m) = self.active.as_mut() {
                let from_left = if m.i < m.left.len() && m.j < m.right.len() {
                    metrics.comparisons += 1;
                    Some(m.left[m.i] <= m.right[m.j])
                } else if m.i < m.left.len() {
                    Some(true)
                } else if m.j < m.right.len() {
                    Some(false)
                } else {
                    None
                };

                if let Some(from_left) = from_left {
                    let k = m.k;
                    if from_left {
                        values[k] = m.left[m.i];
                        m.i += 1;
                    } else {
                        values[k] = m.right[m.j];
                        m.j += 1;
                    }
                    m.k += 1;
                    metrics.writes += 1;
                    return Some(Step::new(vec![k], format!("Writing {} at index {}", values[k], k)));
                }
                self.active = None;
            }

            let (low, mid, high) = *self.plan.get(self.next)?;
            self.next += 1;
            self.active = Some(Merging {
                left: values[low..=mid].to_vec(),
                right: values[mid + 1..=high].to_vec(),
                i: 0,
                j: 0,
                k: low,
            });
        }
    }
}

fn plan_merges(low: usize, high: usize, plan: &mut Vec<(usize, usize, usize)>) {
    if low < high {
        let mid = (low + high) / 2;
        plan_merges(low, mid, plan);
        plan_merges(mid + 1, high, plan);
        plan.push((low, mid, high));
    }
}

#[derive(Debug, Clone)]
struct Partition {
    low: usize,
    high: usize,
    store: usize,
    j: usize,
}

#[derive(Debug, Clone)]
struct Quick {
    pending: Vec<(usize, usize)>,
    active: Option<Partition>,
}

impl Quick {
    fn new(n: usize) -> Self {
        Quick {
            pending: if n > 1 { vec![(0, n - 1)] } else { Vec::new() },
            active: None,
        }
    }

    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        loop {
            if let Some(p) = self.active.as_mut() {
                if p.j < p.high {
                    let j = p.j;
                    p.j += 1;
                    metrics.comparisons += 1;
                    let pivot = values[p.high];
                    if values[j] < pivot {
                        if p.store != j {
                            values.swap(p.store, j);
                            metrics.writes += 2;
                        }
                        p.store += 1;
                    }
                    return Some(Step::new(
                        vec![j, p.high],
                        format!("Comparing {} with pivot {}", values[j], pivot),
                    ));
                }

                let (low, high, store) = (p.low, p.high, p.store);
                self.active = None;
                if store != high {
                    values.swap(store, high);
                    metrics.writes += 2;
                }
                // Right half first so the left half is partitioned next
                if store + 1 < high {
                    self.pending.push((store + 1, high));
                }
                if store > low + 1 {
                    self.pending.push((low, store - 1));
                }
                return Some(Step::new(
                    vec![store, high],
                    format!("Pivot {} placed at index {}", values[store], store),
                ));
            }

            let (low, high) = self.pending.pop()?;
            self.active = Some(Partition {
                low,
                high,
                store: low,
                j: low,
            });
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum HeapPhase {
    /// Heapify roots below `next`, counting down
    Build { next: usize },
    /// Move the max to `end` and shrink the heap
    Extract { end: usize },
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Sift {
    root: usize,
    size: usize,
}

#[derive(Debug, Clone)]
struct Heap {
    phase: HeapPhase,
    sift: Option<Sift>,
}

impl Heap {
    fn new(n: usize) -> Self {
        Heap {
            phase: if n > 1 {
                HeapPhase::Build { next: n / 2 }
            } else {
                HeapPhase::Done
            },
            sift: None,
        }
    }

    fn advance(&mut self, values: &mut [i64], metrics: &mut Metrics) -> Option<Step> {
        loop {
            if let Some(sift) = self.sift.as_mut() {
                let Sift { root, size } = *sift;
                let mut largest = root;
                for child in [2 * root + 1, 2 * root + 2] {
                    if child < size {
                        metrics.comparisons += 1;
                        if values[child] > values[largest] {
                            largest = child;
                        }
                    }
                }
                if largest != root {
                    values.swap(root, largest);
                    metrics.writes += 2;
                    sift.root = largest;
                    return Some(Step::new(
                        vec![root, largest],
                        format!("Sifting {} down", values[largest]),
                    ));
                }
                self.sift = None;
            }

            match self.phase {
                HeapPhase::Build { next: 0 } => {
                    self.phase = HeapPhase::Extract {
                        end: values.len() - 1,
                    };
                }
                HeapPhase::Build { next } => {
                    self.phase = HeapPhase::Build { next: next - 1 };
                    self.sift = Some(Sift {
                        root: next - 1,
                        size: values.len(),
                    });
                }
                HeapPhase::Extract { end: 0 } | HeapPhase::Done => {
                    self.phase = HeapPhase::Done;
                    return None;
                }
                HeapPhase::Extract { end } => {
                    values.swap(0, end);
                    metrics.writes += 2;
                    self.phase = HeapPhase::Extract { end: end - 1 };
                    self.sift = Some(Sift { root: 0, size: end });
                    return Some(Step::new(
                        vec![0, end],
                        format!("Moved max {} to index {}", values[end], end),
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Machine {
    Bubble(Bubble),
    Selection(Selection),
    Insertion(Insertion),
    Merge(Merge),
    Quick(Quick),
    Heap(Heap),
}

/// A comparison sort over a private copy of its input
#[derive(Debug, Clone)]
pub struct ComparisonSort {
    algorithm: SortAlgorithm,
    values: Vec<i64>,
    machine: Machine,
    metrics: Metrics,
    done: bool,
}

impl ComparisonSort {
    pub fn new(algorithm: SortAlgorithm, input: &[i64]) -> Self {
        let n = input.len();
        let machine = match algorithm {
            SortAlgorithm::Bubble => Machine::Bubble(Bubble { pass: 0, j: 0 }),
            SortAlgorithm::Selection => Machine::Selection(Selection { i: 0, j: 1, min: 0 }),
            SortAlgorithm::Insertion => Machine::Insertion(Insertion {
                i: 1,
                hole: 0,
                key: None,
                moved: false,
            }),
            SortAlgorithm::Merge => Machine::Merge(Merge::new(n)),
            SortAlgorithm::Quick => Machine::Quick(Quick::new(n)),
            SortAlgorithm::Heap => Machine::Heap(Heap::new(n)),
        };
        ComparisonSort {
            algorithm,
            values: input.to_vec(),
            machine,
            metrics: Metrics::default(),
            done: false,
        }
    }
}

impl FrameSource for ComparisonSort {
    fn kind(&self) -> FrameKind {
        FrameKind::ComparisonSort
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        if self.done {
            return None;
        }

        let values = &mut self.values;
        let metrics = &mut self.metrics;
        let step = match &mut self.machine {
            Machine::Bubble(m) => m.advance(values, metrics),
            Machine::Selection(m) => m.advance(values, metrics),
            Machine::Insertion(m) => m.advance(values, metrics),
            Machine::Merge(m) => m.advance(values, metrics),
            Machine::Quick(m) => m.advance(values, metrics),
            Machine::Heap(m) => m.advance(values, metrics),
        };

        let state = PrimaryState::Sequence(self.values.clone());
        let frame = match step {
            Some(step) => Frame::logical(FrameKind::ComparisonSort, state)
                .highlight(step.indices.into_iter().map(Mark::Index))
                .message(step.message)
                .metrics(self.metrics)
                .cue(Cue::Click),
            None => {
                self.done = true;
                debug_assert!(
                    self.values.windows(2).all(|w| w[0] <= w[1]),
                    "{} left the array unsorted",
                    self.algorithm
                );
                tracing::debug!(
                    algorithm = %self.algorithm,
                    comparisons = self.metrics.comparisons,
                    writes = self.metrics.writes,
                    "sort finished"
                );
                Frame::logical(FrameKind::ComparisonSort, state)
                    .message(format!("{} complete", self.algorithm))
                    .metrics(self.metrics)
                    .finish(Outcome::Success(Success::Sorted))
            }
        };
        Some(ctx.stamp(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::run_to_end;

    #[test]
    fn merge_plan_is_post_order() {
        let mut plan = Vec::new();
        plan_merges(0, 3, &mut plan);
        assert_eq!(plan, vec![(0, 0, 1), (2, 2, 3), (0, 1, 3)]);
    }

    #[test]
    fn insertion_emits_shift_and_place_frames() {
        let frames = run_to_end(&mut ComparisonSort::new(SortAlgorithm::Insertion, &[2, 1]));
        // one shift, one placement, terminal
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].state, PrimaryState::Sequence(vec![2, 2]));
        assert_eq!(frames[1].state, PrimaryState::Sequence(vec![1, 2]));
        assert!(frames[2].terminal);
    }

    #[test]
    fn single_element_sorts_immediately() {
        for algorithm in SortAlgorithm::ALL {
            let frames = run_to_end(&mut ComparisonSort::new(algorithm, &[7]));
            assert_eq!(frames.len(), 1, "{} emitted extra frames", algorithm);
            assert!(frames[0].terminal);
        }
    }
}
