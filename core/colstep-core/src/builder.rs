//! Append-only output builders.
//!
//! Materialization writes fields through [`FieldSink`]; each implementation
//! type-checks an append against the schema position being filled.

use crate::error::{CursorError, CursorResult};
use crate::types::FieldType;

/// Append-only, type-checked field accumulator.
pub trait FieldSink {
    fn append_i64(&mut self, value: i64) -> CursorResult<()>;

    fn append_f64(&mut self, value: f64) -> CursorResult<()>;

    fn append_bytes(&mut self, value: &[u8]) -> CursorResult<()>;
}

impl<S: FieldSink + ?Sized> FieldSink for &mut S {
    fn append_i64(&mut self, value: i64) -> CursorResult<()> {
        (**self).append_i64(value)
    }

    fn append_f64(&mut self, value: f64) -> CursorResult<()> {
        (**self).append_f64(value)
    }

    fn append_bytes(&mut self, value: &[u8]) -> CursorResult<()> {
        (**self).append_bytes(value)
    }
}

/// Checks that `actual` is the type declared at `next_field`. Shared by
/// [`TupleBuilder`](crate::tuple::TupleBuilder) and
/// [`BlockBuilder`](crate::block::BlockBuilder).
pub(crate) fn expect_field(
    types: &[FieldType],
    next_field: usize,
    actual: FieldType,
) -> CursorResult<()> {
    match types.get(next_field) {
        None => Err(CursorError::Schema(format!(
            "row already has {} fields",
            types.len()
        ))),
        Some(&expected) if expected != actual => Err(CursorError::TypeMismatch {
            field: next_field,
            expected,
            actual,
        }),
        Some(_) => Ok(()),
    }
}
