// Property tests for seeking and lock-step stepping over arbitrary run layouts

use colstep_core::cursor::{
    advance_next_position_all_detailed, advance_next_position_no_yield, current_row_equals,
    current_tuple, is_initialized, seek_to_position,
};
use colstep_core::{
    AdvanceResult, Cursor, CursorConfig, FieldType, RunLengthCursor, Tuple, TupleSchema,
};
use proptest::prelude::*;

fn run_cursor(runs: &[(i64, u64)]) -> RunLengthCursor {
    RunLengthCursor::from_runs(
        TupleSchema::single(FieldType::Int64),
        runs.iter().map(|&(v, n)| (Tuple::from_values([v.into()]), n)),
    )
    .unwrap()
}

/// Value at each position, expanded from the runs.
fn expand(runs: &[(i64, u64)]) -> Vec<i64> {
    runs.iter()
        .flat_map(|&(v, n)| std::iter::repeat_n(v, n as usize))
        .collect()
}

fn runs_strategy() -> impl Strategy<Value = Vec<(i64, u64)>> {
    proptest::collection::vec((0i64..4, 1u64..6), 0..12)
}

/// Runs over an (Int64, Float64) schema. `NaN` is left out: it never equals
/// itself, so a row holding one does not equal its own materialization.
fn mixed_runs_strategy() -> impl Strategy<Value = Vec<(i64, f64, u64)>> {
    let score = prop_oneof![
        Just(0.0f64),
        Just(-0.0f64),
        Just(f64::INFINITY),
        Just(f64::MIN_POSITIVE),
        -1.0e9f64..1.0e9f64,
    ];
    proptest::collection::vec((0i64..4, score, 1u64..6), 0..12)
}

fn mixed_cursor(runs: &[(i64, f64, u64)]) -> RunLengthCursor {
    RunLengthCursor::from_runs(
        TupleSchema::new([FieldType::Int64, FieldType::Float64]),
        runs.iter().map(|&(id, score, n)| (Tuple::from_values([id.into(), score.into()]), n)),
    )
    .unwrap()
}

fn assert_state_exclusive(cursor: &RunLengthCursor) {
    assert!(!(cursor.is_valid() && cursor.is_finished()));
}

proptest! {
    #[test]
    fn seek_lands_on_target_value(runs in runs_strategy(), target in 0i64..70) {
        let values = expand(&runs);
        let mut cursor = run_cursor(&runs);

        let result = seek_to_position(&mut cursor, target).unwrap();
        assert_state_exclusive(&cursor);

        if (target as usize) < values.len() {
            prop_assert_eq!(result, AdvanceResult::Success);
            prop_assert_eq!(cursor.position().unwrap(), target);
            prop_assert_eq!(cursor.get_i64(0).unwrap(), values[target as usize]);
        } else {
            prop_assert_eq!(result, AdvanceResult::Finished);
            prop_assert!(cursor.is_finished());
        }
    }

    #[test]
    fn seek_never_uses_more_calls_than_linear_stepping(
        runs in runs_strategy(),
        target in 0i64..70,
    ) {
        let mut cursor = run_cursor(&runs);
        let _ = seek_to_position(&mut cursor, target).unwrap();

        let stats = cursor.stats();
        prop_assert_eq!(stats.to_position, 0);
        prop_assert!(stats.next_position + stats.next_value <= target as u64 + 1);
    }

    #[test]
    fn seek_chain_matches_single_seek(
        runs in runs_strategy(),
        mut targets in proptest::collection::vec(0i64..70, 1..6),
    ) {
        targets.sort_unstable();
        let last = *targets.last().unwrap();

        let mut chained = run_cursor(&runs);
        let mut result = AdvanceResult::Success;
        for &target in &targets {
            result = seek_to_position(&mut chained, target).unwrap();
            assert_state_exclusive(&chained);
        }

        let mut direct = run_cursor(&runs);
        let direct_result = seek_to_position(&mut direct, last).unwrap();

        prop_assert_eq!(result, direct_result);
        prop_assert_eq!(chained.position().ok(), direct.position().ok());
        prop_assert_eq!(chained.is_finished(), direct.is_finished());
    }

    #[test]
    fn seek_resumes_across_yields(
        runs in runs_strategy(),
        target in 0i64..70,
        interval in 1u32..5,
    ) {
        let mut budgeted = run_cursor(&runs)
            .with_config(CursorConfig::yielding_every(interval).unwrap());
        let result = loop {
            match seek_to_position(&mut budgeted, target).unwrap() {
                AdvanceResult::MustYield => assert_state_exclusive(&budgeted),
                other => break other,
            }
        };

        let mut unbudgeted = run_cursor(&runs);
        prop_assert_eq!(result, seek_to_position(&mut unbudgeted, target).unwrap());
        prop_assert_eq!(budgeted.position().ok(), unbudgeted.position().ok());
    }

    #[test]
    fn every_visited_row_equals_its_materialization(runs in mixed_runs_strategy()) {
        let mut cursor = mixed_cursor(&runs);
        let scores: Vec<f64> = runs
            .iter()
            .flat_map(|&(_, score, n)| std::iter::repeat_n(score, n as usize))
            .collect();
        prop_assert!(!is_initialized(&cursor));
        while advance_next_position_no_yield(&mut cursor).unwrap() {
            assert_state_exclusive(&cursor);
            let tuple = current_tuple(&cursor).unwrap();
            prop_assert!(current_row_equals(&cursor, &tuple).unwrap());

            // the stored double comes back bit for bit
            let position = cursor.position().unwrap() as usize;
            prop_assert_eq!(tuple.get_f64(1).unwrap().to_bits(), scores[position].to_bits());
        }
        prop_assert!(cursor.is_finished());
    }

    #[test]
    fn lock_step_advances_every_cursor_once(
        layouts in proptest::collection::vec(runs_strategy(), 1..5),
    ) {
        let mut group: Vec<RunLengthCursor> = layouts.iter().map(|r| run_cursor(r)).collect();
        let lengths: Vec<usize> = layouts.iter().map(|r| expand(r).len()).collect();

        for step in 1..=12usize {
            let outcome = advance_next_position_all_detailed(group.iter_mut()).unwrap();
            prop_assert_eq!(outcome.stepped, group.len());

            for (index, cursor) in group.iter().enumerate() {
                prop_assert_eq!(cursor.stats().next_position, step as u64);
                let exhausted = step > lengths[index];
                prop_assert_eq!(cursor.is_finished(), exhausted);
                prop_assert_eq!(outcome.stopped.contains(&index), exhausted);
            }
        }
    }
}
