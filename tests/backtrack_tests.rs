// Integration tests for the explicit-stack backtracking searches

use stepviz::backtrack::{Backtracker, Maze, NQueens, SearchProblem, SubsetSum, Sudoku};
use stepviz::frame::{Action, Cue, Failure, Frame, Outcome, PrimaryState, Success};
use stepviz::sources::run_to_end;

/// Replay the trace and check every rollback restores the state seen before its commit
fn check_rollbacks(frames: &[Frame]) -> (usize, usize) {
    let mut pending: Vec<(usize, &PrimaryState)> = Vec::new();
    let (mut commits, mut rollbacks) = (0, 0);

    for (i, frame) in frames.iter().enumerate() {
        let Some(trace) = frame.trace else { continue };
        match trace.action {
            Action::Try => {}
            Action::Commit => {
                commits += 1;
                let before = &frames[i - 1].state;
                pending.push((trace.depth, before));
            }
            Action::Rollback => {
                rollbacks += 1;
                let (depth, before) = pending.pop().expect("rollback without a matching commit");
                assert_eq!(trace.depth, depth, "rollback depth at seq {}", frame.seq);
                assert_eq!(&frame.state, before, "rollback did not restore state at seq {}", frame.seq);
            }
        }
    }
    (commits, rollbacks)
}

fn grid(frame: &Frame) -> &[Vec<i64>] {
    match &frame.state {
        PrimaryState::Grid(rows) => rows,
        other => panic!("expected a grid, got {:?}", other),
    }
}

fn outcome(frames: &[Frame]) -> Outcome {
    frames
        .last()
        .and_then(|f| f.outcome.clone())
        .expect("run ended without an outcome")
}

#[test]
fn test_four_queens_rollbacks_restore_state() {
    let mut search = Backtracker::new(NQueens::new(4).expect("Failed to build board"));
    let frames = run_to_end(&mut search);
    let (commits, rollbacks) = check_rollbacks(&frames);

    assert!(rollbacks > 0, "4-queens needs to backtrack");
    assert_eq!(commits - rollbacks, 4, "four queens remain placed");
    assert_eq!(
        outcome(&frames),
        Outcome::Success(Success::Placement {
            columns: vec![1, 3, 0, 2]
        })
    );
}

#[test]
fn test_small_boards_without_solution_exhaust() {
    for n in [2, 3] {
        let frames = run_to_end(&mut Backtracker::new(NQueens::new(n).expect("Failed to build board")));
        let (commits, rollbacks) = check_rollbacks(&frames);
        assert_eq!(commits, rollbacks, "{}-queens leaves the board empty", n);
        assert_eq!(outcome(&frames), Outcome::Failure(Failure::Exhausted));

        let last = frames.last().expect("terminal frame");
        assert_eq!(last.cue, Some(Cue::Error));
        assert!(grid(last).iter().flatten().all(|&cell| cell == 0));
    }
}

#[test]
fn test_one_queen_is_trivial() {
    let frames = run_to_end(&mut Backtracker::new(NQueens::new(1).expect("Failed to build board")));
    assert_eq!(outcome(&frames), Outcome::Success(Success::Placement { columns: vec![0] }));
}

#[test]
fn test_sudoku_solution_is_valid() {
    let frames = run_to_end(&mut Backtracker::new(Sudoku::classic()));
    check_rollbacks(&frames);
    assert_eq!(outcome(&frames), Outcome::Success(Success::Solved));

    let solved = grid(frames.last().expect("terminal frame"));
    let full: Vec<i64> = (1..=9).collect();
    for r in 0..9 {
        let mut row = solved[r].clone();
        row.sort_unstable();
        assert_eq!(row, full, "row {}", r);

        let mut col: Vec<i64> = (0..9).map(|c| solved[c][r]).collect();
        col.sort_unstable();
        assert_eq!(col, full, "column {}", r);

        let (br, bc) = (r / 3 * 3, r % 3 * 3);
        let mut cells: Vec<i64> = (0..9).map(|k| solved[br + k / 3][bc + k % 3]).collect();
        cells.sort_unstable();
        assert_eq!(cells, full, "box {}", r);
    }
}

#[test]
fn test_sudoku_keeps_givens() {
    let puzzle = Sudoku::classic();
    let givens: Vec<Vec<i64>> = puzzle.grid().to_vec();
    let frames = run_to_end(&mut Backtracker::new(puzzle));
    let solved = grid(frames.last().expect("terminal frame"));
    for (r, row) in givens.iter().enumerate() {
        for (c, &given) in row.iter().enumerate() {
            if given != 0 {
                assert_eq!(solved[r][c], given, "given at ({}, {}) changed", r, c);
            }
        }
    }
}

#[test]
fn test_maze_finds_down_right_path() {
    let frames = run_to_end(&mut Backtracker::new(Maze::classic()));
    check_rollbacks(&frames);
    assert_eq!(
        outcome(&frames),
        Outcome::Success(Success::Path {
            cells: vec![(0, 0), (1, 0), (1, 1), (2, 1), (3, 1), (3, 2), (3, 3)],
        })
    );
}

#[test]
fn test_blocked_maze_exhausts() {
    let maze = Maze::new(vec![vec![1, 0], vec![0, 1]]).expect("Failed to build maze");
    let frames = run_to_end(&mut Backtracker::new(maze));
    assert_eq!(outcome(&frames), Outcome::Failure(Failure::Exhausted));
    let (commits, rollbacks) = check_rollbacks(&frames);
    assert_eq!(commits, rollbacks);
}

#[test]
fn test_subset_sum_picks_first_subset() {
    let problem = SubsetSum::new(&[3, 34, 4, 12, 5, 2], 9).expect("Failed to build problem");
    let frames = run_to_end(&mut Backtracker::new(problem));
    check_rollbacks(&frames);
    assert_eq!(
        outcome(&frames),
        Outcome::Success(Success::Subset {
            indices: vec![0, 2, 5],
            values: vec![3, 4, 2],
        })
    );
}

#[test]
fn test_subset_sum_unreachable_target() {
    let problem = SubsetSum::new(&[2, 4, 6], 5).expect("Failed to build problem");
    let frames = run_to_end(&mut Backtracker::new(problem));
    assert_eq!(outcome(&frames), Outcome::Failure(Failure::Exhausted));
}

#[test]
fn test_commits_click_and_tries_are_silent() {
    let frames = run_to_end(&mut Backtracker::new(NQueens::new(4).expect("Failed to build board")));
    for frame in &frames {
        match frame.trace.map(|t| t.action) {
            Some(Action::Commit) => assert_eq!(frame.cue, Some(Cue::Click)),
            Some(Action::Try) | Some(Action::Rollback) => assert_eq!(frame.cue, None),
            None => assert!(frame.terminal),
        }
    }
}

#[test]
fn test_search_leaves_problem_solved_in_place() {
    let mut search = Backtracker::new(NQueens::new(5).expect("Failed to build board"));
    run_to_end(&mut search);
    assert!(search.problem().is_goal());
    assert_eq!(search.problem().state().len(), 5);
}
