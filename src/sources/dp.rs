//! Dynamic-programming table fills
//!
//! Every source here visits the cells of its table in recurrence order and
//! emits one logical frame per visit, with the written cell highlighted and the
//! `arrow` pointer on it. Tables only ever fill forward.

use super::FrameSource;
use crate::errors::{EngineError, EngineResult};
use crate::frame::{Frame, FrameKind, Mark, Metrics, Outcome, Position, PrimaryState, Success};
use crate::session::RunContext;
use rand::Rng;

/// Square distance matrix with random edges, `None` meaning no direct edge
pub fn random_distances<R: Rng>(n: usize, edge_chance: f64, rng: &mut R) -> Vec<Vec<Option<i64>>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        Some(0)
                    } else if rng.gen_bool(edge_chance) {
                        Some(rng.gen_range(1..=9))
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

/// One cell visit: where, and what to say about it
struct Visit {
    row: usize,
    col: usize,
    message: String,
}

#[derive(Debug, Clone)]
enum Recurrence {
    FloydWarshall {
        n: usize,
        k: usize,
        i: usize,
        j: usize,
    },
    Knapsack {
        weights: Vec<i64>,
        values: Vec<i64>,
        capacity: usize,
        i: usize,
        w: usize,
    },
    Lcs {
        x: Vec<char>,
        y: Vec<char>,
        i: usize,
        j: usize,
    },
    MatrixChain {
        dims: Vec<i64>,
        len: usize,
        i: usize,
        k: usize,
    },
}

fn add(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    Some(a? + b?)
}

/// Whether `candidate` beats `current` where `None` is infinity
fn improves(candidate: Option<i64>, current: Option<i64>) -> bool {
    match (candidate, current) {
        (Some(c), Some(cur)) => c < cur,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

impl Recurrence {
    fn advance(&mut self, cells: &mut [Vec<Option<i64>>], metrics: &mut Metrics) -> Option<Visit> {
        match self {
            Recurrence::FloydWarshall { n, k, i, j } => {
                if *k >= *n {
                    return None;
                }
                let (kk, ii, jj) = (*k, *i, *j);
                let through = add(cells[ii][kk], cells[kk][jj]);
                metrics.comparisons += 1;
                if improves(through, cells[ii][jj]) {
                    cells[ii][jj] = through;
                    metrics.writes += 1;
                }

                *j += 1;
                if *j == *n {
                    *j = 0;
                    *i += 1;
                    if *i == *n {
                        *i = 0;
                        *k += 1;
                    }
                }
                Some(Visit {
                    row: ii,
                    col: jj,
                    message: format!("Step k={}, i={}, j={}", kk + 1, ii, jj),
                })
            }
            Recurrence::Knapsack {
                weights,
                values,
                capacity,
                i,
                w,
            } => {
                if *i > weights.len() {
                    return None;
                }
                let (ii, ww) = (*i, *w);
                let skip = cells[ii - 1][ww];
                let weight = weights[ii - 1];
                cells[ii][ww] = if weight as usize <= ww {
                    metrics.comparisons += 1;
                    let take = add(cells[ii - 1][ww - weight as usize], Some(values[ii - 1]));
                    skip.max(take)
                } else {
                    skip
                };
                metrics.writes += 1;

                *w += 1;
                if *w > *capacity {
                    *w = 0;
                    *i += 1;
                }
                Some(Visit {
                    row: ii,
                    col: ww,
                    message: format!("Knapsack (i={}, w={})", ii, ww),
                })
            }
            Recurrence::Lcs { x, y, i, j } => {
                if *i > x.len() || y.is_empty() {
                    return None;
                }
                let (ii, jj) = (*i, *j);
                metrics.comparisons += 1;
                cells[ii][jj] = if x[ii - 1] == y[jj - 1] {
                    add(cells[ii - 1][jj - 1], Some(1))
                } else {
                    cells[ii - 1][jj].max(cells[ii][jj - 1])
                };
                metrics.writes += 1;

                *j += 1;
                if *j > y.len() {
                    *j = 1;
                    *i += 1;
                }
                Some(Visit {
                    row: ii,
                    col: jj,
                    message: format!("LCS (i={}, j={})", ii, jj),
                })
            }
            Recurrence::MatrixChain { dims, len, i, k } => {
                let n = dims.len() - 1;
                if *len > n {
                    return None;
                }
                let (ii, kk) = (*i, *k);
                let jj = ii + *len - 1;
                let cost = add(cells[ii][kk], cells[kk + 1][jj])
                    .map(|partial| partial + dims[ii] * dims[kk + 1] * dims[jj + 1]);
                metrics.comparisons += 1;
                if improves(cost, cells[ii][jj]) {
                    cells[ii][jj] = cost;
                    metrics.writes += 1;
                }

                *k += 1;
                if *k == jj {
                    *i += 1;
                    if *i + *len > n {
                        *len += 1;
                        *i = 0;
                    }
                    *k = *i;
                }
                Some(Visit {
                    row: ii,
                    col: jj,
                    message: format!("Matrix Chain (i={}, j={}, k={})", ii, jj, kk),
                })
            }
        }
    }

    fn result(&self, cells: &[Vec<Option<i64>>]) -> Success {
        match self {
            Recurrence::FloydWarshall { n, .. } => {
                let reachable = cells.iter().flatten().filter(|d| d.is_some()).count();
                Success::TableFilled {
                    answer: None,
                    detail: Some(format!(
                        "shortest paths: {} of {} pairs reachable",
                        reachable,
                        n * n
                    )),
                }
            }
            Recurrence::Knapsack {
                weights, capacity, ..
            } => Success::TableFilled {
                answer: cells[weights.len()][*capacity],
                detail: Some(format!("best value within capacity {}", capacity)),
            },
            Recurrence::Lcs { x, y, .. } => {
                let lcs = lcs_traceback(cells, x, y);
                Success::TableFilled {
                    answer: cells[x.len()][y.len()],
                    detail: Some(format!("LCS \"{}\"", lcs)),
                }
            }
            Recurrence::MatrixChain { dims, .. } => Success::TableFilled {
                answer: cells[0][dims.len() - 2],
                detail: Some("minimal scalar multiplications".to_string()),
            },
        }
    }
}

fn lcs_traceback(cells: &[Vec<Option<i64>>], x: &[char], y: &[char]) -> String {
    let (mut i, mut j) = (x.len(), y.len());
    let mut out = Vec::new();
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            out.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if cells[i - 1][j] >= cells[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.iter().rev().collect()
}

/// A table-filling dynamic program
#[derive(Debug, Clone)]
pub struct TableFill {
    recurrence: Recurrence,
    cells: Vec<Vec<Option<i64>>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    metrics: Metrics,
    done: bool,
}

impl TableFill {
    /// All-pairs shortest paths over a square matrix (`None` = no edge)
    pub fn floyd_warshall(matrix: Vec<Vec<Option<i64>>>) -> EngineResult<Self> {
        let n = matrix.len();
        if matrix.iter().any(|row| row.len() != n) {
            return Err(EngineError::invalid_input("distance matrix must be square"));
        }
        if matrix.iter().flatten().flatten().any(|&d| d < 0) {
            return Err(EngineError::invalid_input("distances must be non-negative"));
        }
        let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        Ok(TableFill {
            recurrence: Recurrence::FloydWarshall { n, k: 0, i: 0, j: 0 },
            cells: matrix,
            row_labels: labels.clone(),
            col_labels: labels,
            metrics: Metrics::default(),
            done: false,
        })
    }

    /// 0/1 knapsack; rows are items (row 0 = no items), columns capacities
    pub fn knapsack(weights: &[i64], values: &[i64], capacity: usize) -> EngineResult<Self> {
        if weights.len() != values.len() {
            return Err(EngineError::invalid_input(format!(
                "{} weights but {} values",
                weights.len(),
                values.len()
            )));
        }
        if weights.iter().chain(values).any(|&v| v < 0) {
            return Err(EngineError::invalid_input("weights and values must be non-negative"));
        }
        let row_labels = std::iter::once("-".to_string())
            .chain(weights.iter().zip(values).map(|(w, v)| format!("{}/{}", w, v)))
            .collect();
        Ok(TableFill {
            recurrence: Recurrence::Knapsack {
                weights: weights.to_vec(),
                values: values.to_vec(),
                capacity,
                i: 1,
                w: 0,
            },
            cells: vec![vec![Some(0); capacity + 1]; weights.len() + 1],
            row_labels,
            col_labels: (0..=capacity).map(|w| w.to_string()).collect(),
            metrics: Metrics::default(),
            done: false,
        })
    }

    /// Longest common subsequence of two strings
    pub fn lcs(x: &str, y: &str) -> Self {
        let x: Vec<char> = x.chars().collect();
        let y: Vec<char> = y.chars().collect();
        let labels = |s: &[char]| {
            std::iter::once("-".to_string())
                .chain(s.iter().map(char::to_string))
                .collect()
        };
        TableFill {
            row_labels: labels(&x),
            col_labels: labels(&y),
            cells: vec![vec![Some(0); y.len() + 1]; x.len() + 1],
            recurrence: Recurrence::Lcs { x, y, i: 1, j: 1 },
            metrics: Metrics::default(),
            done: false,
        }
    }

    /// Matrix-chain ordering; matrix `i` is `dims[i] x dims[i + 1]`
    pub fn matrix_chain(dims: &[i64]) -> EngineResult<Self> {
        if dims.len() < 2 {
            return Err(EngineError::invalid_input(
                "matrix chain needs at least two dimensions",
            ));
        }
        if dims.iter().any(|&d| d <= 0) {
            return Err(EngineError::invalid_input("matrix dimensions must be positive"));
        }
        let n = dims.len() - 1;
        let cells = (0..n)
            .map(|i| (0..n).map(|j| (i == j).then_some(0)).collect())
            .collect();
        let labels: Vec<String> = (1..=n).map(|i| format!("A{}", i)).collect();
        Ok(TableFill {
            recurrence: Recurrence::MatrixChain {
                dims: dims.to_vec(),
                len: 2,
                i: 0,
                k: 0,
            },
            cells,
            row_labels: labels.clone(),
            col_labels: labels,
            metrics: Metrics::default(),
            done: false,
        })
    }

    pub fn cells(&self) -> &[Vec<Option<i64>>] {
        &self.cells
    }

    fn state(&self) -> PrimaryState {
        PrimaryState::Table {
            cells: self.cells.clone(),
            row_labels: self.row_labels.clone(),
            col_labels: self.col_labels.clone(),
        }
    }
}

impl FrameSource for TableFill {
    fn kind(&self) -> FrameKind {
        FrameKind::DpTable
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        if self.done {
            return None;
        }

        let frame = match self.recurrence.advance(&mut self.cells, &mut self.metrics) {
            Some(visit) => Frame::logical(FrameKind::DpTable, self.state())
                .highlight([Mark::Cell {
                    row: visit.row,
                    col: visit.col,
                }])
                .pointer(
                    "arrow",
                    Position::Cell {
                        row: visit.row,
                        col: visit.col,
                    },
                )
                .metrics(self.metrics)
                .message(visit.message),
            None => {
                self.done = true;
                let success = self.recurrence.result(&self.cells);
                tracing::debug!(writes = self.metrics.writes, "table filled");
                Frame::logical(FrameKind::DpTable, self.state())
                    .metrics(self.metrics)
                    .message("Table complete")
                    .finish(Outcome::Success(success))
            }
        };
        Some(ctx.stamp(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::run_to_end;

    fn answer(frames: &[Frame]) -> Option<i64> {
        match frames.last().and_then(|f| f.outcome.clone()) {
            Some(Outcome::Success(Success::TableFilled { answer, .. })) => answer,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn knapsack_classic_best_value() {
        let mut source = TableFill::knapsack(&[2, 3, 4, 5, 9], &[3, 4, 5, 8, 10], 10).expect("valid");
        let frames = run_to_end(&mut source);
        // 5 items x 11 capacities, plus the terminal frame
        assert_eq!(frames.len(), 5 * 11 + 1);
        assert_eq!(answer(&frames), Some(15));
    }

    #[test]
    fn lcs_reports_length_and_string() {
        let frames = run_to_end(&mut TableFill::lcs("ACDB", "ACB"));
        assert_eq!(frames.len(), 4 * 3 + 1);
        let last = frames.last().expect("terminal");
        assert_eq!(
            last.outcome,
            Some(Outcome::Success(Success::TableFilled {
                answer: Some(3),
                detail: Some("LCS \"ACB\"".to_string()),
            }))
        );
    }

    #[test]
    fn matrix_chain_textbook_dims() {
        let frames = run_to_end(&mut TableFill::matrix_chain(&[5, 10, 3, 12, 5, 50, 6]).expect("valid"));
        assert_eq!(answer(&frames), Some(2010));
    }

    #[test]
    fn floyd_warshall_relaxes_through_middle_node() {
        let matrix = vec![
            vec![Some(0), Some(1), None],
            vec![Some(1), Some(0), Some(2)],
            vec![None, Some(2), Some(0)],
        ];
        let mut source = TableFill::floyd_warshall(matrix).expect("square");
        let frames = run_to_end(&mut source);
        assert_eq!(frames.len(), 27 + 1);
        assert_eq!(source.cells()[0][2], Some(3));
        assert_eq!(source.cells()[2][0], Some(3));
    }

    #[test]
    fn every_visit_points_at_the_highlighted_cell() {
        let frames = run_to_end(&mut TableFill::lcs("AB", "B"));
        for frame in frames.iter().filter(|f| !f.terminal) {
            let Some(Position::Cell { row, col }) = frame.pointers.get("arrow") else {
                panic!("missing arrow");
            };
            assert!(frame.highlights(Mark::Cell { row, col }));
        }
    }

    #[test]
    fn rejects_ragged_matrix() {
        assert!(TableFill::floyd_warshall(vec![vec![Some(0)], vec![]]).is_err());
        assert!(TableFill::matrix_chain(&[4]).is_err());
    }
}
