//! Scan a few cursors with logging enabled.
//!
//! Run: COLSTEP_LOG=colstep_core=trace cargo run --example logging --features logging

use arrow::util::pretty::pretty_format_batches;
use colstep_core::cursor::{advance_next_position_all, append_current_row, seek_to_position};
use colstep_core::{
    BlockBuilder, Cursor, CursorConfig, CursorResult, FieldType, RunLengthCursor, Tuple,
    TupleSchema,
};

fn column(field_type: FieldType, runs: Vec<(Tuple, u64)>) -> CursorResult<RunLengthCursor> {
    RunLengthCursor::from_runs(TupleSchema::single(field_type), runs)
}

fn main() -> CursorResult<()> {
    if !colstep_core::logging::init_with_level("debug") {
        println!("logging disabled: rebuild with --features logging");
    }

    let mut ids = column(
        FieldType::Int64,
        (0..8i64).map(|i| (Tuple::from_values([i.into()]), 1)).collect(),
    )?;
    let mut regions = column(
        FieldType::VariableBytes,
        vec![
            (Tuple::from_values(["eu".into()]), 3),
            (Tuple::from_values(["us".into()]), 5),
        ],
    )?
    .with_config(CursorConfig::from_env()?);

    // Seek the region column with a yield budget, re-issuing on MustYield
    let mut yields = 0;
    while seek_to_position(&mut regions, 2)?.must_yield() {
        yields += 1;
    }
    println!("regions at position {} after {yields} yields", regions.position()?);

    // Line the id column up, then scan both in lock-step into one block
    if !seek_to_position(&mut ids, 2)?.is_success() {
        return Ok(());
    }
    let schema = TupleSchema::new([FieldType::Int64, FieldType::VariableBytes]);
    let mut block = BlockBuilder::new(schema);
    let mut group = [ids, regions.with_config(CursorConfig::no_yield())];
    loop {
        let [ids, regions] = &group;
        append_current_row(ids, &mut block)?;
        append_current_row(regions, &mut block)?;
        if !advance_next_position_all(group.iter_mut())? {
            break;
        }
    }

    let batch = block.finish()?;
    let table = pretty_format_batches(&[batch])?;
    println!("{table}");
    Ok(())
}
