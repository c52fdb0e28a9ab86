//! Tuple equality — compare the current row with a materialized tuple.
//!
//! Doubles compare with IEEE `==`: no epsilon, `NaN` never equals itself and
//! `0.0 == -0.0`. Callers that need tolerance round beforehand.

use super::Cursor;
use crate::error::{CursorError, CursorResult};
use crate::tuple::Tuple;
use crate::types::FieldType;

/// Whether the cursor's current row equals `tuple`, field by field.
///
/// Differing field counts or differing declared types yield `false`, not an
/// error. Stops at the first unequal field.
///
/// A row compared with its own materialization is equal unless one of its
/// doubles is `NaN`.
pub fn current_row_equals<C: Cursor + ?Sized>(cursor: &C, tuple: &Tuple) -> CursorResult<bool> {
    let field_count = cursor.schema().field_count();
    if field_count != tuple.field_count() {
        return Ok(false);
    }
    for field in 0..field_count {
        if !current_field_equals(cursor, tuple, field)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether `field` of the current row equals the same field of `tuple`.
pub fn current_field_equals<C: Cursor + ?Sized>(
    cursor: &C,
    tuple: &Tuple,
    field: usize,
) -> CursorResult<bool> {
    let (Some(expected), Some(actual)) = (
        tuple.schema().field_type(field),
        cursor.schema().field_type(field),
    ) else {
        return Err(CursorError::InvalidArgument(format!(
            "field {field} out of range (cursor has {}, tuple has {})",
            cursor.schema().field_count(),
            tuple.field_count()
        )));
    };

    if expected != actual {
        return Ok(false);
    }

    let equal = match expected {
        FieldType::Int64 => tuple.get_i64(field)? == cursor.get_i64(field)?,
        FieldType::Float64 => tuple.get_f64(field)? == cursor.get_f64(field)?,
        FieldType::VariableBytes => tuple.get_bytes(field)? == cursor.get_bytes(field)?,
    };
    Ok(equal)
}
