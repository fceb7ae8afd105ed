//! Graph traversals: BFS, DFS and Dijkstra
//!
//! One logical frame per node visited (BFS dequeue, DFS entry, Dijkstra
//! finalization). `highlighted` is the set of nodes visited so far and the
//! `current` pointer names the node just visited. Frames carry a distance
//! vector: BFS levels, DFS tree depth, or Dijkstra tentative distances.

use super::FrameSource;
use crate::errors::EngineResult;
use crate::frame::graph::Graph;
use crate::frame::{Cue, Frame, FrameKind, Mark, Metrics, Outcome, Position, PrimaryState, Success};
use crate::session::RunContext;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;

fn visit_frame(
    graph: &Arc<Graph>,
    distances: &[Option<u64>],
    order: &[usize],
    current: usize,
    metrics: Metrics,
    message: String,
) -> Frame {
    Frame::logical(
        FrameKind::GraphTraversal,
        PrimaryState::Graph {
            graph: Arc::clone(graph),
            distances: distances.to_vec(),
        },
    )
    .highlight(order.iter().map(|&n| Mark::Node(n)))
    .pointer("current", Position::Node(current))
    .metrics(metrics)
    .message(message)
    .cue(Cue::Click)
}

fn final_frame(
    graph: &Arc<Graph>,
    distances: &[Option<u64>],
    order: &[usize],
    metrics: Metrics,
    message: String,
    success: Success,
) -> Frame {
    Frame::logical(
        FrameKind::GraphTraversal,
        PrimaryState::Graph {
            graph: Arc::clone(graph),
            distances: distances.to_vec(),
        },
    )
    .highlight(order.iter().map(|&n| Mark::Node(n)))
    .metrics(metrics)
    .message(message)
    .finish(Outcome::Success(success))
}

/// Breadth-first search from a start node
#[derive(Debug, Clone)]
pub struct BreadthFirst {
    graph: Arc<Graph>,
    queue: VecDeque<usize>,
    seen: FxHashSet<usize>,
    levels: Vec<Option<u64>>,
    order: Vec<usize>,
    metrics: Metrics,
    done: bool,
}

impl BreadthFirst {
    pub fn new(graph: Arc<Graph>, start: usize) -> EngineResult<Self> {
        graph.check_node(start)?;
        let mut levels = vec![None; graph.len()];
        levels[start] = Some(0);
        let mut seen = FxHashSet::default();
        seen.insert(start);
        Ok(BreadthFirst {
            graph,
            queue: VecDeque::from([start]),
            seen,
            levels,
            order: Vec::new(),
            metrics: Metrics::default(),
            done: false,
        })
    }
}

impl FrameSource for BreadthFirst {
    fn kind(&self) -> FrameKind {
        FrameKind::GraphTraversal
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        if self.done {
            return None;
        }

        let Some(current) = self.queue.pop_front() else {
            self.done = true;
            let frame = final_frame(
                &self.graph,
                &self.levels,
                &self.order,
                self.metrics,
                format!("BFS complete: {} nodes reached", self.order.len()),
                Success::Traversed {
                    order: self.order.clone(),
                },
            );
            return Some(ctx.stamp(frame));
        };

        self.order.push(current);
        let level = self.levels[current].unwrap_or(0);
        for &(next, _) in self.graph.neighbors(current) {
            self.metrics.comparisons += 1;
            if self.seen.insert(next) {
                self.levels[next] = Some(level + 1);
                self.queue.push_back(next);
                self.metrics.writes += 1;
            }
        }

        let frame = visit_frame(
            &self.graph,
            &self.levels,
            &self.order,
            current,
            self.metrics,
            format!("BFS: Visiting Node {}", current),
        );
        Some(ctx.stamp(frame))
    }
}

/// Depth-first search with an explicit stack, visiting in recursive order
#[derive(Debug, Clone)]
pub struct DepthFirst {
    graph: Arc<Graph>,
    start: Option<usize>,
    /// (node, index of the next neighbor to look at)
    stack: Vec<(usize, usize)>,
    seen: FxHashSet<usize>,
    depths: Vec<Option<u64>>,
    order: Vec<usize>,
    metrics: Metrics,
    done: bool,
}

impl DepthFirst {
    pub fn new(graph: Arc<Graph>, start: usize) -> EngineResult<Self> {
        graph.check_node(start)?;
        let depths = vec![None; graph.len()];
        Ok(DepthFirst {
            graph,
            start: Some(start),
            stack: Vec::new(),
            seen: FxHashSet::default(),
            depths,
            order: Vec::new(),
            metrics: Metrics::default(),
            done: false,
        })
    }

    fn enter(&mut self, node: usize) -> Frame {
        self.seen.insert(node);
        self.depths[node] = Some(self.stack.len() as u64);
        self.order.push(node);
        self.stack.push((node, 0));
        visit_frame(
            &self.graph,
            &self.depths,
            &self.order,
            node,
            self.metrics,
            format!("DFS: Visiting Node {}", node),
        )
    }
}

impl FrameSource for DepthFirst {
    fn kind(&self) -> FrameKind {
        FrameKind::GraphTraversal
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        if self.done {
            return None;
        }
        if let Some(start) = self.start.take() {
            let frame = self.enter(start);
            return Some(ctx.stamp(frame));
        }

        while let Some(&(node, next)) = self.stack.last() {
            let neighbors = self.graph.neighbors(node);
            if next < neighbors.len() {
                let candidate = neighbors[next].0;
                if let Some(top) = self.stack.last_mut() {
                    top.1 += 1;
                }
                self.metrics.comparisons += 1;
                if !self.seen.contains(&candidate) {
                    let frame = self.enter(candidate);
                    return Some(ctx.stamp(frame));
                }
            } else {
                self.stack.pop();
            }
        }

        self.done = true;
        let frame = final_frame(
            &self.graph,
            &self.depths,
            &self.order,
            self.metrics,
            format!("DFS complete: {} nodes reached", self.order.len()),
            Success::Traversed {
                order: self.order.clone(),
            },
        );
        Some(ctx.stamp(frame))
    }
}

/// Lazy-deletion Dijkstra over non-negative weights
#[derive(Debug, Clone)]
pub struct Dijkstra {
    graph: Arc<Graph>,
    heap: BinaryHeap<Reverse<(u64, usize)>>,
    distances: Vec<Option<u64>>,
    finalized: FxHashSet<usize>,
    order: Vec<usize>,
    metrics: Metrics,
    done: bool,
}

impl Dijkstra {
    pub fn new(graph: Arc<Graph>, start: usize) -> EngineResult<Self> {
        graph.check_node(start)?;
        let mut distances = vec![None; graph.len()];
        distances[start] = Some(0);
        Ok(Dijkstra {
            graph,
            heap: BinaryHeap::from([Reverse((0, start))]),
            distances,
            finalized: FxHashSet::default(),
            order: Vec::new(),
            metrics: Metrics::default(),
            done: false,
        })
    }
}

impl FrameSource for Dijkstra {
    fn kind(&self) -> FrameKind {
        FrameKind::GraphTraversal
    }

    fn next_frame(&mut self, ctx: &mut RunContext) -> Option<Frame> {
        if self.done {
            return None;
        }

        while let Some(Reverse((dist, node))) = self.heap.pop() {
            self.metrics.comparisons += 1;
            // Stale entry: a shorter path already finalized this node
            if !self.finalized.insert(node) {
                continue;
            }
            self.order.push(node);

            for &(next, weight) in self.graph.neighbors(node) {
                let candidate = dist + u64::from(weight);
                if self.distances[next].map_or(true, |known| candidate < known) {
                    self.distances[next] = Some(candidate);
                    self.heap.push(Reverse((candidate, next)));
                    self.metrics.writes += 1;
                }
            }

            let frame = visit_frame(
                &self.graph,
                &self.distances,
                &self.order,
                node,
                self.metrics,
                format!("Dijkstra: Node {}, Dist={}", node, dist),
            );
            return Some(ctx.stamp(frame));
        }

        self.done = true;
        let frame = final_frame(
            &self.graph,
            &self.distances,
            &self.order,
            self.metrics,
            format!("Dijkstra complete: {} nodes finalized", self.order.len()),
            Success::ShortestPaths {
                distances: self.distances.clone(),
            },
        );
        Some(ctx.stamp(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::graph::Edge;
    use crate::sources::run_to_end;

    fn path_graph() -> Arc<Graph> {
        Arc::new(
            Graph::new(
                &[(0, 0), (1, 0), (2, 0), (3, 0)],
                vec![
                    Edge { a: 0, b: 1, weight: 1 },
                    Edge { a: 1, b: 2, weight: 1 },
                    Edge { a: 0, b: 3, weight: 5 },
                ],
            )
            .expect("valid graph"),
        )
    }

    #[test]
    fn bfs_visits_by_level() {
        let frames = run_to_end(&mut BreadthFirst::new(path_graph(), 0).expect("start"));
        let last = frames.last().expect("terminal");
        assert_eq!(
            last.outcome,
            Some(Outcome::Success(Success::Traversed {
                order: vec![0, 1, 3, 2]
            }))
        );
        assert_eq!(frames.len(), 5);
    }

    #[test]
    fn dfs_follows_first_neighbor_deep() {
        let frames = run_to_end(&mut DepthFirst::new(path_graph(), 0).expect("start"));
        let last = frames.last().expect("terminal");
        assert_eq!(
            last.outcome,
            Some(Outcome::Success(Success::Traversed {
                order: vec![0, 1, 2, 3]
            }))
        );
    }

    #[test]
    fn out_of_range_start_fails_fast() {
        assert!(Dijkstra::new(path_graph(), 9).is_err());
    }
}
