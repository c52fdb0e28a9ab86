// Seek benchmarks
//
// Section 1: value-run seeking vs. position-by-position stepping
// Section 2: materialization into blocks and tuple equality

use colstep_core::cursor::{
    advance_next_position_no_yield, append_current_row, current_row_equals, seek_to_position,
};
use colstep_core::{BlockBuilder, Cursor, FieldType, RunLengthCursor, Tuple, TupleSchema};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// `runs` value runs of `run_length` positions each.
fn rle_cursor(runs: i64, run_length: u64) -> RunLengthCursor {
    RunLengthCursor::from_runs(
        TupleSchema::single(FieldType::Int64),
        (0..runs).map(|v| (Tuple::from_values([v.into()]), run_length)),
    )
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Section 1: seek
// ═══════════════════════════════════════════════════════════════════════════

fn bench_seek(c: &mut Criterion) {
    let mut group = c.benchmark_group("seek");

    for run_length in [1u64, 16, 1024] {
        let runs = (65_536 / run_length) as i64;
        let base = rle_cursor(runs, run_length);
        let target = 65_000i64;

        group.bench_with_input(
            BenchmarkId::new("by_value_runs", run_length),
            &base,
            |b, base| {
                b.iter(|| {
                    let mut cursor = base.clone();
                    black_box(seek_to_position(&mut cursor, black_box(target)).unwrap())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("by_positions", run_length),
            &base,
            |b, base| {
                b.iter(|| {
                    let mut cursor = base.clone();
                    while advance_next_position_no_yield(&mut cursor).unwrap() {
                        if cursor.position().unwrap() == target {
                            break;
                        }
                    }
                    black_box(cursor.position().unwrap())
                })
            },
        );
    }

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Section 2: materialization and equality
// ═══════════════════════════════════════════════════════════════════════════

fn mixed_cursor(rows: i64) -> RunLengthCursor {
    RunLengthCursor::from_rows((0..rows).map(|i| {
        Tuple::from_values([i.into(), (i as f64).into(), format!("row-{i}").as_str().into()])
    }))
    .unwrap()
}

fn bench_materialize(c: &mut Criterion) {
    let base = mixed_cursor(4096);
    let probe = Tuple::from_values([4000i64.into(), 4000.0f64.into(), "row-4000".into()]);

    c.bench_function("append_rows_4096", |b| {
        b.iter(|| {
            let mut cursor = base.clone();
            let mut block = BlockBuilder::with_capacity(cursor.schema().clone(), 4096);
            while advance_next_position_no_yield(&mut cursor).unwrap() {
                append_current_row(&cursor, &mut block).unwrap();
            }
            black_box(block.finish().unwrap())
        })
    });

    c.bench_function("row_equals_scan_4096", |b| {
        b.iter(|| {
            let mut cursor = base.clone();
            let mut matches = 0;
            while advance_next_position_no_yield(&mut cursor).unwrap() {
                if current_row_equals(&cursor, black_box(&probe)).unwrap() {
                    matches += 1;
                }
            }
            black_box(matches)
        })
    });
}

criterion_group!(benches, bench_seek, bench_materialize);
criterion_main!(benches);
