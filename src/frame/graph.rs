//! Weighted graph shared by the traversal sources
//!
//! Nodes carry 2D layout positions for the renderer. Edges are undirected;
//! the adjacency list is built once at construction and mirrors every edge.

use crate::errors::{EngineError, EngineResult};
use rand::Rng;

/// A node with its layout position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub id: usize,
    pub x: i32,
    pub y: i32,
}

/// An undirected weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<(usize, u32)>>,
}

/// Layout area used for generated graphs
pub const LAYOUT_X: (i32, i32) = (100, 900);
pub const LAYOUT_Y: (i32, i32) = (120, 500);

impl Graph {
    /// Build a graph from node positions and an undirected edge list
    pub fn new(positions: &[(i32, i32)], edges: Vec<Edge>) -> EngineResult<Self> {
        let count = positions.len();
        for edge in &edges {
            if edge.a >= count || edge.b >= count {
                return Err(EngineError::malformed_graph(format!(
                    "edge {}-{} references a node outside 0..{}",
                    edge.a, edge.b, count
                )));
            }
            if edge.a == edge.b {
                return Err(EngineError::malformed_graph(format!(
                    "self-loop on node {}",
                    edge.a
                )));
            }
        }
        Ok(Self::assemble(positions, edges))
    }

    /// Random layout and edges: each pair is joined with 40% probability, weights 1..=9
    pub fn random<R: Rng>(node_count: usize, rng: &mut R) -> Self {
        let positions: Vec<(i32, i32)> = (0..node_count)
            .map(|_| {
                (
                    rng.gen_range(LAYOUT_X.0..=LAYOUT_X.1),
                    rng.gen_range(LAYOUT_Y.0..=LAYOUT_Y.1),
                )
            })
            .collect();

        let mut edges = Vec::new();
        for a in 0..node_count {
            for b in (a + 1)..node_count {
                if rng.gen_bool(0.4) {
                    edges.push(Edge {
                        a,
                        b,
                        weight: rng.gen_range(1..=9),
                    });
                }
            }
        }

        // Endpoints are in 0..node_count with a < b
        Self::assemble(&positions, edges)
    }

    /// Lay out nodes and mirror every edge into the adjacency list
    fn assemble(positions: &[(i32, i32)], edges: Vec<Edge>) -> Self {
        let nodes: Vec<Node> = positions
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Node { id, x, y })
            .collect();

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in &edges {
            adjacency[edge.a].push((edge.b, edge.weight));
            adjacency[edge.b].push((edge.a, edge.weight));
        }

        Graph {
            nodes,
            edges,
            adjacency,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Neighbors of `node` with edge weights, in edge-list order
    pub fn neighbors(&self, node: usize) -> &[(usize, u32)] {
        debug_assert!(node < self.adjacency.len(), "node {} out of range", node);
        &self.adjacency[node]
    }

    /// Check a start node before a traversal begins
    pub fn check_node(&self, node: usize) -> EngineResult<()> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(EngineError::malformed_graph(format!(
                "start node {} outside 0..{}",
                node,
                self.nodes.len()
            )))
        }
    }
}
