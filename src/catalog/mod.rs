//! The closed set of algorithms and their default workloads
//!
//! [`Algorithm`] is what the menus list and what `--headless` accepts.
//! [`Scenario`] holds the inputs each algorithm runs on; the randomized parts
//! (arrays, graph layout, distance matrix) come from a seeded RNG so the same
//! seed always replays the same frames.

use crate::backtrack::{Backtracker, Maze, NQueens, SubsetSum, Sudoku};
use crate::errors::{EngineError, EngineResult};
use crate::frame::graph::Graph;
use crate::sources::dp::{random_distances, TableFill};
use crate::sources::search::{LinearScan, RangeSearch};
use crate::sources::sorting::{ComparisonSort, SortAlgorithm};
use crate::sources::traversal::{BreadthFirst, DepthFirst, Dijkstra};
use crate::sources::FrameSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Menu grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Searching,
    Sorting,
    Graph,
    DynamicProgramming,
    Backtracking,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Searching,
        Family::Sorting,
        Family::Graph,
        Family::DynamicProgramming,
        Family::Backtracking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Searching => "Searching",
            Family::Sorting => "Sorting",
            Family::Graph => "Graph Algorithms",
            Family::DynamicProgramming => "Dynamic Programming",
            Family::Backtracking => "Backtracking",
        }
    }

    /// Algorithms of this family in menu order
    pub fn algorithms(self) -> impl Iterator<Item = Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(move |algorithm| algorithm.family() == self)
    }
}

/// Info-panel text for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
    pub concept: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    Bfs,
    Dfs,
    Dijkstra,
    FloydWarshall,
    Knapsack,
    Lcs,
    MatrixChain,
    NQueens,
    Sudoku,
    RatInMaze,
    SubsetSum,
}

impl Algorithm {
    pub const ALL: [Algorithm; 19] = [
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::HeapSort,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::FloydWarshall,
        Algorithm::Knapsack,
        Algorithm::Lcs,
        Algorithm::MatrixChain,
        Algorithm::NQueens,
        Algorithm::Sudoku,
        Algorithm::RatInMaze,
        Algorithm::SubsetSum,
    ];

    pub fn family(self) -> Family {
        match self {
            Algorithm::LinearSearch | Algorithm::BinarySearch => Family::Searching,
            Algorithm::BubbleSort
            | Algorithm::SelectionSort
            | Algorithm::InsertionSort
            | Algorithm::MergeSort
            | Algorithm::QuickSort
            | Algorithm::HeapSort => Family::Sorting,
            Algorithm::Bfs | Algorithm::Dfs | Algorithm::Dijkstra => Family::Graph,
            Algorithm::FloydWarshall
            | Algorithm::Knapsack
            | Algorithm::Lcs
            | Algorithm::MatrixChain => Family::DynamicProgramming,
            Algorithm::NQueens | Algorithm::Sudoku | Algorithm::RatInMaze | Algorithm::SubsetSum => {
                Family::Backtracking
            }
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::SelectionSort => "Selection Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::HeapSort => "Heap Sort",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::FloydWarshall => "Floyd–Warshall",
            Algorithm::Knapsack => "0/1 Knapsack",
            Algorithm::Lcs => "LCS",
            Algorithm::MatrixChain => "Matrix Chain",
            Algorithm::NQueens => "N-Queens",
            Algorithm::Sudoku => "Sudoku Solver",
            Algorithm::RatInMaze => "Rat in a Maze",
            Algorithm::SubsetSum => "Subset Sum",
        }
    }

    /// Command-line name
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "linear",
            Algorithm::BinarySearch => "binary",
            Algorithm::BubbleSort => "bubble",
            Algorithm::SelectionSort => "selection",
            Algorithm::InsertionSort => "insertion",
            Algorithm::MergeSort => "merge",
            Algorithm::QuickSort => "quick",
            Algorithm::HeapSort => "heap",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::FloydWarshall => "floyd-warshall",
            Algorithm::Knapsack => "knapsack",
            Algorithm::Lcs => "lcs",
            Algorithm::MatrixChain => "matrix-chain",
            Algorithm::NQueens => "n-queens",
            Algorithm::Sudoku => "sudoku",
            Algorithm::RatInMaze => "maze",
            Algorithm::SubsetSum => "subset-sum",
        }
    }

    pub fn complexity(self) -> Complexity {
        let (time, space, concept) = match self {
            Algorithm::LinearSearch => ("O(n)", "O(1)", "Checks each element in turn until the target is found."),
            Algorithm::BinarySearch => ("O(log n)", "O(1)", "Halves a sorted range around the middle element."),
            Algorithm::BubbleSort => ("O(n²)", "O(1)", "Swaps adjacent out-of-order pairs, pass after pass."),
            Algorithm::SelectionSort => ("O(n²)", "O(1)", "Selects the minimum of the unsorted part each pass."),
            Algorithm::InsertionSort => ("O(n²)", "O(1)", "Shifts each key left into the sorted prefix."),
            Algorithm::MergeSort => ("O(n log n)", "O(n)", "Splits in halves and merges sorted runs."),
            Algorithm::QuickSort => ("O(n log n)", "O(log n)", "Partitions around the last element as pivot."),
            Algorithm::HeapSort => ("O(n log n)", "O(1)", "Builds a max-heap and extracts the root repeatedly."),
            Algorithm::Bfs => ("O(V + E)", "O(V)", "Visits nodes level by level with a queue."),
            Algorithm::Dfs => ("O(V + E)", "O(V)", "Follows one branch as deep as possible first."),
            Algorithm::Dijkstra => ("O((V + E) log V)", "O(V)", "Finalizes the closest unvisited node each step."),
            Algorithm::FloydWarshall => ("O(V³)", "O(V²)", "Finds shortest path between all pairs using DP."),
            Algorithm::Knapsack => ("O(N·W)", "O(N·W)", "Maximizes total value under capacity constraints."),
            Algorithm::Lcs => ("O(M·N)", "O(M·N)", "Finds longest subsequence common to two strings."),
            Algorithm::MatrixChain => ("O(N³)", "O(N²)", "Optimizes matrix multiplication order."),
            Algorithm::NQueens => ("O(N!)", "O(N²)", "Place N queens safely."),
            Algorithm::Sudoku => ("O(9ⁿ)", "O(81)", "Solve Sudoku with constraint check."),
            Algorithm::RatInMaze => ("O(2^(N²))", "O(N²)", "Find path from start to destination."),
            Algorithm::SubsetSum => ("O(2ⁿ)", "O(n)", "Find subsets matching target sum."),
        };
        Complexity {
            time,
            space,
            concept,
        }
    }

    /// Whether a run needs a search target from the user
    pub fn needs_target(self) -> bool {
        matches!(self, Algorithm::LinearSearch | Algorithm::BinarySearch)
    }

    /// Build a fresh frame source over `scenario`
    #[tracing::instrument(level = "debug", skip(scenario), fields(algorithm = self.slug()))]
    pub fn source(self, scenario: &Scenario, target: Option<i64>) -> EngineResult<Box<dyn FrameSource>> {
        let target = || {
            target.ok_or_else(|| EngineError::invalid_input(format!("{} needs a search target", self.name())))
        };
        let sort = |algorithm| -> Box<dyn FrameSource> {
            Box::new(ComparisonSort::new(algorithm, &scenario.sort_values))
        };
        let graph = || Arc::clone(&scenario.graph);

        let source: Box<dyn FrameSource> = match self {
            Algorithm::LinearSearch => Box::new(LinearScan::new(&scenario.search_values, target()?)),
            Algorithm::BinarySearch => Box::new(RangeSearch::new(&scenario.search_values, target()?)),
            Algorithm::BubbleSort => sort(SortAlgorithm::Bubble),
            Algorithm::SelectionSort => sort(SortAlgorithm::Selection),
            Algorithm::InsertionSort => sort(SortAlgorithm::Insertion),
            Algorithm::MergeSort => sort(SortAlgorithm::Merge),
            Algorithm::QuickSort => sort(SortAlgorithm::Quick),
            Algorithm::HeapSort => sort(SortAlgorithm::Heap),
            Algorithm::Bfs => Box::new(BreadthFirst::new(graph(), scenario.start)?),
            Algorithm::Dfs => Box::new(DepthFirst::new(graph(), scenario.start)?),
            Algorithm::Dijkstra => Box::new(Dijkstra::new(graph(), scenario.start)?),
            Algorithm::FloydWarshall => Box::new(TableFill::floyd_warshall(scenario.distances.clone())?),
            Algorithm::Knapsack => Box::new(TableFill::knapsack(
                &scenario.knapsack.weights,
                &scenario.knapsack.values,
                scenario.knapsack.capacity,
            )?),
            Algorithm::Lcs => Box::new(TableFill::lcs(&scenario.lcs.0, &scenario.lcs.1)),
            Algorithm::MatrixChain => Box::new(TableFill::matrix_chain(&scenario.chain_dims)?),
            Algorithm::NQueens => Box::new(Backtracker::new(NQueens::new(scenario.queens)?)),
            Algorithm::Sudoku => Box::new(Backtracker::new(Sudoku::new(scenario.sudoku.clone())?)),
            Algorithm::RatInMaze => Box::new(Backtracker::new(Maze::new(scenario.maze.clone())?)),
            Algorithm::SubsetSum => Box::new(Backtracker::new(SubsetSum::new(
                &scenario.subset.0,
                scenario.subset.1,
            )?)),
        };
        Ok(source)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.slug() == wanted)
            .ok_or_else(|| EngineError::invalid_input(format!("unknown algorithm '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackInput {
    pub weights: Vec<i64>,
    pub values: Vec<i64>,
    pub capacity: usize,
}

/// Inputs for every algorithm in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub search_values: Vec<i64>,
    pub sort_values: Vec<i64>,
    pub graph: Arc<Graph>,
    pub start: usize,
    pub distances: Vec<Vec<Option<i64>>>,
    pub knapsack: KnapsackInput,
    pub lcs: (String, String),
    pub chain_dims: Vec<i64>,
    pub queens: usize,
    pub sudoku: Vec<Vec<i64>>,
    pub maze: Vec<Vec<i64>>,
    pub subset: (Vec<i64>, i64),
}

const SEARCH_LEN: usize = 20;
const SORT_LEN: usize = 30;
const GRAPH_NODES: usize = 6;
const MATRIX_NODES: usize = 5;
const MATRIX_EDGE_CHANCE: f64 = 0.5;

impl Scenario {
    /// The classic demo workloads, randomized parts drawn from `seed`
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut values = |len: usize| -> Vec<i64> { (0..len).map(|_| rng.gen_range(10..=99)).collect() };
        let search_values = values(SEARCH_LEN);
        let sort_values = values(SORT_LEN);
        let graph = Arc::new(Graph::random(GRAPH_NODES, &mut rng));
        let distances = random_distances(MATRIX_NODES, MATRIX_EDGE_CHANCE, &mut rng);

        Scenario {
            search_values,
            sort_values,
            graph,
            start: 0,
            distances,
            knapsack: KnapsackInput {
                weights: vec![2, 3, 4, 5, 9],
                values: vec![3, 4, 5, 8, 10],
                capacity: 10,
            },
            lcs: ("ACDB".to_string(), "ACB".to_string()),
            chain_dims: vec![5, 10, 3, 12, 5, 50, 6],
            queens: 8,
            sudoku: crate::backtrack::sudoku::CLASSIC_PUZZLE
                .iter()
                .map(|row| row.to_vec())
                .collect(),
            maze: crate::backtrack::maze::CLASSIC_MAZE
                .iter()
                .map(|row| row.to_vec())
                .collect(),
            subset: (vec![3, 34, 4, 12, 5, 2], 9),
        }
    }
}
