// Integration tests for graph traversal and dynamic programming sources

use std::sync::Arc;

use stepviz::catalog::{Algorithm, Scenario};
use stepviz::frame::graph::{Edge, Graph};
use stepviz::frame::{Frame, Mark, Outcome, Position, PrimaryState, Success};
use stepviz::sources::dp::TableFill;
use stepviz::sources::run_to_end;
use stepviz::sources::traversal::{BreadthFirst, DepthFirst, Dijkstra};

fn diamond() -> Arc<Graph> {
    // 0 -1- 1 -1- 3, 0 -4- 2 -1- 3, 1 -2- 2
    let graph = Graph::new(
        &[(100, 300), (400, 150), (400, 450), (800, 300)],
        vec![
            Edge { a: 0, b: 1, weight: 1 },
            Edge { a: 1, b: 3, weight: 1 },
            Edge { a: 0, b: 2, weight: 4 },
            Edge { a: 2, b: 3, weight: 1 },
            Edge { a: 1, b: 2, weight: 2 },
        ],
    )
    .expect("Failed to build graph");
    Arc::new(graph)
}

fn current_node(frame: &Frame) -> usize {
    match frame.pointers.get("current") {
        Some(Position::Node(node)) => node,
        other => panic!("expected a node pointer, got {:?}", other),
    }
}

fn distances(frame: &Frame) -> &[Option<u64>] {
    match &frame.state {
        PrimaryState::Graph { distances, .. } => distances,
        other => panic!("expected graph state, got {:?}", other),
    }
}

fn table_answer(frames: &[Frame]) -> (Option<i64>, Option<String>) {
    match frames.last().and_then(|f| f.outcome.clone()) {
        Some(Outcome::Success(Success::TableFilled { answer, detail })) => (answer, detail),
        other => panic!("expected a filled table, got {:?}", other),
    }
}

#[test]
fn test_dijkstra_finalizes_in_distance_order() {
    let frames = run_to_end(&mut Dijkstra::new(diamond(), 0).expect("Failed to start Dijkstra"));
    let steps: Vec<&Frame> = frames.iter().filter(|f| !f.terminal).collect();
    assert_eq!(steps.len(), 4, "one frame per finalized node");

    let finalized: Vec<u64> = steps
        .iter()
        .map(|f| distances(f)[current_node(f)].expect("finalized node has a distance"))
        .collect();
    assert!(
        finalized.windows(2).all(|w| w[0] <= w[1]),
        "finalization order must be non-decreasing: {:?}",
        finalized
    );

    assert_eq!(
        frames.last().and_then(|f| f.outcome.clone()),
        Some(Outcome::Success(Success::ShortestPaths {
            distances: vec![Some(0), Some(1), Some(3), Some(2)],
        }))
    );
}

#[test]
fn test_dijkstra_leaves_unreachable_nodes_infinite() {
    let graph = Graph::new(
        &[(0, 0), (1, 0), (2, 0)],
        vec![Edge { a: 0, b: 1, weight: 7 }],
    )
    .expect("Failed to build graph");
    let frames = run_to_end(&mut Dijkstra::new(Arc::new(graph), 0).expect("start in range"));
    let last = frames.last().expect("terminal frame");
    assert_eq!(distances(last), &[Some(0), Some(7), None]);
    assert_eq!(frames.len(), 3);
}

#[test]
fn test_bfs_visits_each_reachable_node_once() {
    let frames = run_to_end(&mut BreadthFirst::new(diamond(), 3).expect("Failed to start BFS"));
    let order = match frames.last().and_then(|f| f.outcome.clone()) {
        Some(Outcome::Success(Success::Traversed { order })) => order,
        other => panic!("expected traversal order, got {:?}", other),
    };
    assert_eq!(order[0], 3);
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3]);

    // Levels from node 3: 1 and 2 are neighbors, 0 is two hops away
    let last = frames.last().expect("terminal frame");
    assert_eq!(distances(last), &[Some(2), Some(1), Some(1), Some(0)]);
}

#[test]
fn test_visited_highlights_grow_monotonically() {
    let frames = run_to_end(&mut DepthFirst::new(diamond(), 0).expect("Failed to start DFS"));
    for pair in frames.windows(2) {
        assert!(
            pair[0].highlighted.is_subset(&pair[1].highlighted),
            "visited set shrank between seq {} and {}",
            pair[0].seq,
            pair[1].seq
        );
    }
    let last = frames.last().expect("terminal frame");
    for node in 0..4 {
        assert!(last.highlights(Mark::Node(node)));
    }
}

#[test]
fn test_edges_are_followed_in_both_directions() {
    let graph = Arc::new(
        Graph::new(&[(0, 0), (1, 0)], vec![Edge { a: 0, b: 1, weight: 3 }])
            .expect("Failed to build graph"),
    );

    let frames = run_to_end(&mut BreadthFirst::new(Arc::clone(&graph), 1).expect("Failed to start BFS"));
    assert_eq!(
        frames.last().and_then(|f| f.outcome.clone()),
        Some(Outcome::Success(Success::Traversed { order: vec![1, 0] }))
    );

    let frames = run_to_end(&mut Dijkstra::new(graph, 1).expect("Failed to start Dijkstra"));
    assert_eq!(distances(frames.last().expect("terminal frame")), &[Some(3), Some(0)]);
}

#[test]
fn test_traversal_rejects_start_outside_graph() {
    assert!(BreadthFirst::new(diamond(), 4).is_err());
    assert!(DepthFirst::new(diamond(), 10).is_err());
}

#[test]
fn test_seeded_scenario_replays_identically() {
    for algorithm in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::FloydWarshall,
    ] {
        let a = run_to_end(
            &mut algorithm
                .source(&Scenario::seeded(42), None)
                .expect("Failed to build source"),
        );
        let b = run_to_end(
            &mut algorithm
                .source(&Scenario::seeded(42), None)
                .expect("Failed to build source"),
        );
        assert_eq!(a, b, "{} differs between identical seeds", algorithm);
    }
}

#[test]
fn test_every_catalog_entry_terminates_once() {
    let scenario = Scenario::seeded(3);
    for algorithm in Algorithm::ALL {
        let target = algorithm.needs_target().then_some(scenario.search_values[4]);
        let mut source = algorithm
            .source(&scenario, target)
            .expect("Failed to build source");
        let frames = run_to_end(&mut source);
        let terminals = frames.iter().filter(|f| f.terminal).count();
        assert_eq!(terminals, 1, "{} emitted {} terminal frames", algorithm, terminals);
        assert!(frames.last().is_some_and(|f| f.terminal), "{} ended early", algorithm);
    }
}

#[test]
fn test_knapsack_answer() {
    let mut table =
        TableFill::knapsack(&[2, 3, 4, 5, 9], &[3, 4, 5, 8, 10], 10).expect("Failed to build table");
    let frames = run_to_end(&mut table);
    let (answer, _) = table_answer(&frames);
    assert_eq!(answer, Some(15));
    assert_eq!(frames.len(), 5 * 11 + 1);
}

#[test]
fn test_lcs_answer_and_string() {
    let frames = run_to_end(&mut TableFill::lcs("ABCBDAB", "BDCABA"));
    let (answer, detail) = table_answer(&frames);
    assert_eq!(answer, Some(4));
    let detail = detail.expect("LCS detail");
    let reported = detail
        .strip_prefix("LCS \"")
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("detail names the subsequence");

    // Several length-4 subsequences exist; the reported one must be common to both
    assert_eq!(reported.len(), 4, "reported {:?}", reported);
    assert!(is_subsequence(reported, "ABCBDAB"));
    assert!(is_subsequence(reported, "BDCABA"));
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

#[test]
fn test_matrix_chain_answer() {
    let frames = run_to_end(&mut TableFill::matrix_chain(&[10, 30, 5, 60]).expect("Failed to build table"));
    let (answer, _) = table_answer(&frames);
    assert_eq!(answer, Some(4500));
}

#[test]
fn test_floyd_warshall_matches_dijkstra() {
    let scenario = Scenario::seeded(11);
    let n = scenario.graph.len();
    let mut matrix = vec![vec![None; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for edge in scenario.graph.edges() {
        let w = i64::from(edge.weight);
        let shorter = |old: Option<i64>| Some(old.map_or(w, |o: i64| o.min(w)));
        matrix[edge.a][edge.b] = shorter(matrix[edge.a][edge.b]);
        matrix[edge.b][edge.a] = shorter(matrix[edge.b][edge.a]);
    }

    let mut table = TableFill::floyd_warshall(matrix).expect("Failed to build table");
    run_to_end(&mut table);
    let cells = table.cells().to_vec();

    for start in 0..n {
        let frames = run_to_end(
            &mut Dijkstra::new(Arc::clone(&scenario.graph), start).expect("start in range"),
        );
        let last = frames.last().expect("terminal frame");
        let expected: Vec<Option<i64>> = distances(last)
            .iter()
            .map(|d| d.map(|d| d as i64))
            .collect();
        assert_eq!(cells[start], expected, "row {} disagrees with Dijkstra", start);
    }
}

#[test]
fn test_dp_rejects_bad_input() {
    assert!(TableFill::knapsack(&[1, 2], &[1], 3).is_err());
    assert!(TableFill::knapsack(&[-1], &[1], 3).is_err());
    assert!(TableFill::matrix_chain(&[5]).is_err());
    assert!(TableFill::matrix_chain(&[5, 0, 3]).is_err());
    assert!(TableFill::floyd_warshall(vec![vec![Some(0), Some(-2)], vec![Some(1), Some(0)]]).is_err());
}
