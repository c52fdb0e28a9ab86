//! Tuple materialization — copy the current row into a builder.

use super::Cursor;
use super::validate::check_readable;
use crate::builder::FieldSink;
use crate::error::{CursorError, CursorResult};
use crate::tuple::{Tuple, TupleBuilder};
use crate::types::FieldType;

/// Append every field of the current row to `sink`, in schema order.
///
/// The cursor must already be readable; callers run
/// [`check_readable`] once rather than per field.
pub fn append_current_row<C, S>(cursor: &C, sink: &mut S) -> CursorResult<()>
where
    C: Cursor + ?Sized,
    S: FieldSink + ?Sized,
{
    for field in 0..cursor.schema().field_count() {
        append_current_field(cursor, field, sink)?;
    }
    Ok(())
}

/// Append a single field of the current row to `sink`.
pub fn append_current_field<C, S>(cursor: &C, field: usize, sink: &mut S) -> CursorResult<()>
where
    C: Cursor + ?Sized,
    S: FieldSink + ?Sized,
{
    let field_type = cursor.schema().field_type(field).ok_or_else(|| {
        CursorError::InvalidArgument(format!(
            "field {field} out of range for schema {}",
            cursor.schema()
        ))
    })?;

    match field_type {
        FieldType::Int64 => sink.append_i64(cursor.get_i64(field)?),
        FieldType::Float64 => sink.append_f64(cursor.get_f64(field)?),
        FieldType::VariableBytes => sink.append_bytes(cursor.get_bytes(field)?),
    }
}

/// Materialize the current row as a standalone [`Tuple`].
pub fn current_tuple<C: Cursor + ?Sized>(cursor: &C) -> CursorResult<Tuple> {
    check_readable(cursor)?;
    let mut builder = TupleBuilder::new(cursor.schema().clone());
    append_current_row(cursor, &mut builder)?;
    builder.build()
}
