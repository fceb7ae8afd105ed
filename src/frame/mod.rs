//! Frame data model
//!
//! A [`Frame`] is an immutable snapshot of everything a renderer needs to draw
//! one instant of an algorithm run:
//! - [`PrimaryState`]: an owned copy of the data (sequence, grid, graph, table)
//! - [`Mark`]s to highlight and named [`Pointers`]
//! - a status message, [`Metrics`], an optional backtracking [`Trace`] event
//!   and sound [`Cue`]
//! - `terminal` / [`Outcome`] on the final frame of a run
//!
//! Frames own their state, so mutating the live algorithm state after a frame
//! has been emitted never changes it. The only shared piece is the
//! [`graph::Graph`] behind an [`Arc`], which no source mutates.
//!
//! # Logical and cosmetic frames
//!
//! Every algorithm step is one [`StepKind::Logical`] frame. Sub-animations
//! (pointer slides, the lift on a found bar) are [`StepKind::Cosmetic`] frames:
//! they repeat the last logical metrics and never touch algorithm state, so
//! tests and counters can filter them with [`Frame::is_cosmetic`].

pub mod graph;
pub mod history;

use graph::Graph;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Which overlay schema the renderer applies to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    LinearScan,
    RangeSearch,
    ComparisonSort,
    GraphTraversal,
    DpTable,
    ConstraintSearch,
}

impl FrameKind {
    pub fn label(self) -> &'static str {
        match self {
            FrameKind::LinearScan => "linear scan",
            FrameKind::RangeSearch => "range search",
            FrameKind::ComparisonSort => "comparison sort",
            FrameKind::GraphTraversal => "graph traversal",
            FrameKind::DpTable => "dp table",
            FrameKind::ConstraintSearch => "constraint search",
        }
    }
}

/// Owned data snapshot carried by a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryState {
    /// Ordered values (search and sort bars)
    Sequence(Vec<i64>),

    /// Values plus per-index selection flags (subset sum)
    Selection { values: Vec<i64>, chosen: Vec<bool> },

    /// Row-major 2D grid (chess board, sudoku, maze)
    Grid(Vec<Vec<i64>>),

    /// Node/edge set plus tentative distances (`None` = unreached)
    Graph {
        graph: Arc<Graph>,
        distances: Vec<Option<u64>>,
    },

    /// DP table (`None` = infinity)
    Table {
        cells: Vec<Vec<Option<i64>>>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    },
}

impl PrimaryState {
    /// Rough byte footprint, used for history accounting
    pub fn estimated_size(&self) -> usize {
        match self {
            PrimaryState::Sequence(values) => values.len() * 8,
            PrimaryState::Selection { values, chosen } => values.len() * 8 + chosen.len(),
            PrimaryState::Grid(rows) => rows.iter().map(|r| r.len() * 8).sum(),
            // The graph itself is shared, only the distance vector is per frame
            PrimaryState::Graph { distances, .. } => distances.len() * 16,
            PrimaryState::Table {
                cells,
                row_labels,
                col_labels,
            } => {
                let cells: usize = cells.iter().map(|r| r.len() * 16).sum();
                let labels: usize = row_labels
                    .iter()
                    .chain(col_labels.iter())
                    .map(String::len)
                    .sum();
                cells + labels
            }
        }
    }
}

/// Something the renderer should emphasize
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    Index(usize),
    Cell { row: usize, col: usize },
    Node(usize),
}

/// Where a named pointer sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Index into a sequence; fractional while interpolating
    Linear(f64),
    Cell { row: usize, col: usize },
    Node(usize),
}

impl Position {
    pub fn as_linear(self) -> Option<f64> {
        match self {
            Position::Linear(at) => Some(at),
            _ => None,
        }
    }
}

/// Named pointers (role -> position), iterated in role order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pointers(BTreeMap<&'static str, Position>);

impl Pointers {
    pub fn new() -> Self {
        Pointers(BTreeMap::new())
    }

    pub fn with(mut self, role: &'static str, at: Position) -> Self {
        self.0.insert(role, at);
        self
    }

    pub fn set(&mut self, role: &'static str, at: Position) {
        self.0.insert(role, at);
    }

    pub fn get(&self, role: &str) -> Option<Position> {
        self.0.get(role).copied()
    }

    /// Linear position of a role, if it has one
    pub fn linear(&self, role: &str) -> Option<f64> {
        self.get(role).and_then(Position::as_linear)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Position)> + '_ {
        self.0.iter().map(|(role, at)| (*role, *at))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Counters shown next to the visualization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub comparisons: u64,
    pub writes: u64,
    /// Logical steps taken in this run (stamped by the run context)
    pub steps: u64,
}

/// Whether a frame advances the algorithm or only animates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Logical,
    Cosmetic,
}

/// Backtracking transition recorded on constraint-search frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Try,
    Commit,
    Rollback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    pub action: Action,
    /// Depth of the search node the action applies to (root = 0)
    pub depth: usize,
}

/// Abstract sound cue for the sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Success,
    Error,
}

/// Positive result payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Success {
    Found { index: usize },
    Sorted,
    Traversed { order: Vec<usize> },
    ShortestPaths { distances: Vec<Option<u64>> },
    TableFilled { answer: Option<i64>, detail: Option<String> },
    Placement { columns: Vec<usize> },
    Solved,
    Path { cells: Vec<(usize, usize)> },
    Subset { indices: Vec<usize>, values: Vec<i64> },
}

/// Negative results; still a normal end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Success),
    Failure(Failure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(Success::Found { index }) => write!(f, "found at index {}", index),
            Outcome::Success(Success::Sorted) => write!(f, "sorted"),
            Outcome::Success(Success::Traversed { order }) => {
                write!(f, "visited {:?}", order)
            }
            Outcome::Success(Success::ShortestPaths { distances }) => {
                let shown: Vec<String> = distances
                    .iter()
                    .map(|d| d.map_or_else(|| "∞".to_string(), |d| d.to_string()))
                    .collect();
                write!(f, "distances [{}]", shown.join(", "))
            }
            Outcome::Success(Success::TableFilled { answer, detail }) => match (answer, detail) {
                (Some(v), Some(detail)) => write!(f, "answer {} ({})", v, detail),
                (Some(v), None) => write!(f, "answer {}", v),
                (None, Some(detail)) => write!(f, "{}", detail),
                (None, None) => write!(f, "table filled"),
            },
            Outcome::Success(Success::Placement { columns }) => {
                write!(f, "queens at columns {:?}", columns)
            }
            Outcome::Success(Success::Solved) => write!(f, "solved"),
            Outcome::Success(Success::Path { cells }) => write!(f, "path {:?}", cells),
            Outcome::Success(Success::Subset { values, .. }) => write!(f, "subset {:?}", values),
            Outcome::Failure(Failure::NotFound) => write!(f, "not found"),
            Outcome::Failure(Failure::Exhausted) => write!(f, "no solution"),
        }
    }
}

/// One renderable instant of an algorithm run
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub seq: u64,
    pub kind: FrameKind,
    pub state: PrimaryState,
    pub highlighted: BTreeSet<Mark>,
    pub pointers: Pointers,
    pub message: String,
    pub metrics: Metrics,
    pub step: StepKind,
    pub trace: Option<Trace>,
    pub cue: Option<Cue>,
    pub terminal: bool,
    pub outcome: Option<Outcome>,
}

impl Frame {
    /// Start a logical frame; `seq` and `metrics.steps` are stamped by the run context
    pub fn logical(kind: FrameKind, state: PrimaryState) -> Self {
        Frame {
            seq: 0,
            kind,
            state,
            highlighted: BTreeSet::new(),
            pointers: Pointers::new(),
            message: String::new(),
            metrics: Metrics::default(),
            step: StepKind::Logical,
            trace: None,
            cue: None,
            terminal: false,
            outcome: None,
        }
    }

    /// Start a cosmetic frame
    pub fn cosmetic(kind: FrameKind, state: PrimaryState) -> Self {
        Frame {
            step: StepKind::Cosmetic,
            ..Frame::logical(kind, state)
        }
    }

    pub fn highlight(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.highlighted.extend(marks);
        self
    }

    pub fn pointers(mut self, pointers: Pointers) -> Self {
        self.pointers = pointers;
        self
    }

    pub fn pointer(mut self, role: &'static str, at: Position) -> Self {
        self.pointers.set(role, at);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn trace(mut self, action: Action, depth: usize) -> Self {
        self.trace = Some(Trace { action, depth });
        self
    }

    pub fn cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Mark as the final frame of the run, with the matching cue
    pub fn finish(mut self, outcome: Outcome) -> Self {
        self.cue = Some(if outcome.is_success() {
            Cue::Success
        } else {
            Cue::Error
        });
        self.terminal = true;
        self.outcome = Some(outcome);
        self
    }

    pub fn is_cosmetic(&self) -> bool {
        self.step == StepKind::Cosmetic
    }

    pub fn is_logical(&self) -> bool {
        self.step == StepKind::Logical
    }

    pub fn highlights(&self, mark: Mark) -> bool {
        self.highlighted.contains(&mark)
    }

    /// Estimate the memory usage of this frame in bytes
    pub fn estimated_size(&self) -> usize {
        // Fixed fields plus the variable parts, roughly
        std::mem::size_of::<Frame>()
            + self.state.estimated_size()
            + self.highlighted.len() * 24
            + self.message.len()
    }
}
