// Integration tests for the searching and sorting frame sources

use proptest::prelude::*;
use stepviz::frame::{Frame, Outcome, Position, PrimaryState, Success};
use stepviz::sources::run_to_end;
use stepviz::sources::search::{LinearScan, RangeSearch};
use stepviz::sources::sorting::{ComparisonSort, SortAlgorithm};

fn logical_steps(frames: &[Frame]) -> Vec<&Frame> {
    frames
        .iter()
        .filter(|f| f.is_logical() && !f.terminal)
        .collect()
}

fn final_sequence(frames: &[Frame]) -> Vec<i64> {
    match &frames.last().expect("no frames").state {
        PrimaryState::Sequence(values) => values.clone(),
        other => panic!("expected a sequence, got {:?}", other),
    }
}

#[test]
fn test_linear_scan_emits_one_step_per_checked_index() {
    let values = [42, 17, 8, 99, 23];
    let frames = run_to_end(&mut LinearScan::new(&values, 99));

    assert_eq!(logical_steps(&frames).len(), 4, "k + 1 checks for target at k = 3");
    let last = frames.last().expect("terminal frame");
    assert!(last.terminal);
    assert_eq!(last.outcome, Some(Outcome::Success(Success::Found { index: 3 })));
    assert_eq!(frames.iter().filter(|f| f.is_cosmetic()).count(), 10, "lift frames");
}

#[test]
fn test_linear_scan_miss_checks_everything() {
    let values = [5, 6, 7];
    let frames = run_to_end(&mut LinearScan::new(&values, 1));
    assert_eq!(logical_steps(&frames).len(), 3);
    assert!(frames.iter().all(|f| !f.is_cosmetic()));
    assert_eq!(
        frames.last().and_then(|f| f.outcome.clone()),
        Some(Outcome::Failure(stepviz::frame::Failure::NotFound))
    );
}

#[test]
fn test_binary_search_direct_hit() {
    let frames = run_to_end(&mut RangeSearch::new(&[10, 20, 30, 40, 50], 30));
    let probes = logical_steps(&frames);

    assert_eq!(probes.len(), 1, "single probe frame");
    let probe = probes[0];
    assert_eq!(probe.pointers.get("low"), Some(Position::Linear(0.0)));
    assert_eq!(probe.pointers.get("mid"), Some(Position::Linear(2.0)));
    assert_eq!(probe.pointers.get("high"), Some(Position::Linear(4.0)));
    assert_eq!(
        frames.last().and_then(|f| f.outcome.clone()),
        Some(Outcome::Success(Success::Found { index: 2 }))
    );
}

#[test]
fn test_binary_search_range_shrinks_every_probe() {
    let values: Vec<i64> = (0..40).map(|i| i * 3).collect();
    for target in [-1, 0, 57, 58, 117, 200] {
        let frames = run_to_end(&mut RangeSearch::new(&values, target));
        let probes = logical_steps(&frames);
        let widths: Vec<f64> = probes
            .iter()
            .map(|f| {
                let low = f.pointers.linear("low").expect("low pointer");
                let high = f.pointers.linear("high").expect("high pointer");
                high - low
            })
            .collect();
        assert!(
            widths.windows(2).all(|w| w[1] < w[0]),
            "range must shrink for target {}: {:?}",
            target,
            widths
        );

        let mut mids: Vec<i64> = probes
            .iter()
            .map(|f| f.pointers.linear("mid").expect("mid pointer") as i64)
            .collect();
        let probed = mids.len();
        mids.sort_unstable();
        mids.dedup();
        assert_eq!(mids.len(), probed, "no index probed twice");
    }
}

#[test]
fn test_cosmetic_frames_never_advance_counters() {
    let frames = run_to_end(&mut RangeSearch::new(&[1, 3, 5, 7, 9, 11, 13, 15], 13));
    let mut previous: Option<&Frame> = None;
    for frame in &frames {
        if let Some(prev) = previous {
            if frame.is_cosmetic() {
                assert_eq!(frame.metrics.comparisons, prev.metrics.comparisons);
                assert_eq!(frame.metrics.steps, prev.metrics.steps);
            }
        }
        previous = Some(frame);
    }
    assert!(frames.iter().any(|f| f.is_cosmetic()));
}

#[test]
fn test_sequence_numbers_strictly_increase() {
    let frames = run_to_end(&mut RangeSearch::new(&[4, 8, 15, 16, 23, 42], 4));
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.seq, i as u64);
    }
    assert_eq!(frames.iter().filter(|f| f.terminal).count(), 1);
}

#[test]
fn test_bubble_sort_comparison_count() {
    let input = [5, 1, 4, 2, 8, 0, 3];
    let frames = run_to_end(&mut ComparisonSort::new(SortAlgorithm::Bubble, &input));
    let n = input.len();
    assert_eq!(logical_steps(&frames).len(), n * (n - 1) / 2);
    assert_eq!(final_sequence(&frames), vec![0, 1, 2, 3, 4, 5, 8]);
}

#[test]
fn test_sort_does_not_touch_caller_input() {
    let input = vec![3, 2, 1];
    let mut source = ComparisonSort::new(SortAlgorithm::Quick, &input);
    let frames = run_to_end(&mut source);
    assert_eq!(input, vec![3, 2, 1]);
    assert_eq!(final_sequence(&frames), vec![1, 2, 3]);
}

#[test]
fn test_rebuilt_sort_replays_identically() {
    let input = [9, 3, 7, 1, 8, 2];
    for algorithm in SortAlgorithm::ALL {
        let a = run_to_end(&mut ComparisonSort::new(algorithm, &input));
        let b = run_to_end(&mut ComparisonSort::new(algorithm, &input));
        assert_eq!(a, b, "{} frames differ between runs", algorithm);
    }
}

#[test]
fn test_exhausted_source_stays_exhausted() {
    let mut source = ComparisonSort::new(SortAlgorithm::Heap, &[2, 1]);
    let mut ctx = stepviz::session::RunContext::new();
    while stepviz::sources::FrameSource::next_frame(&mut source, &mut ctx).is_some() {}
    assert!(stepviz::sources::FrameSource::next_frame(&mut source, &mut ctx).is_none());
}

proptest! {
    #[test]
    fn test_sorts_yield_sorted_permutation(
        values in prop::collection::vec(-50i64..50, 0..24),
        which in 0usize..6,
    ) {
        let algorithm = SortAlgorithm::ALL[which];
        let frames = run_to_end(&mut ComparisonSort::new(algorithm, &values));

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(final_sequence(&frames), expected);

        let last = frames.last().expect("terminal frame");
        prop_assert!(last.terminal);
        prop_assert_eq!(last.outcome.clone(), Some(Outcome::Success(Success::Sorted)));

        // Every intermediate state is a permutation of the input
        let mut sorted_input = values.clone();
        sorted_input.sort();
        for frame in &frames {
            if let PrimaryState::Sequence(state) = &frame.state {
                let mut state = state.clone();
                state.sort();
                if algorithm != SortAlgorithm::Merge && algorithm != SortAlgorithm::Insertion {
                    prop_assert_eq!(&state, &sorted_input);
                } else {
                    prop_assert_eq!(state.len(), sorted_input.len());
                }
            }
        }

        let terminal_count = frames.iter().filter(|f| f.terminal).count();
        prop_assert_eq!(terminal_count, 1);
    }
}
