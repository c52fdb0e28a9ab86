//! Readability checks.

use super::Cursor;
use crate::error::{CursorError, CursorResult};

/// Fails unless `cursor` is positioned on readable data.
///
/// Finished → `StreamExhausted`; never advanced → `IllegalState`.
pub fn check_readable<C: Cursor + ?Sized>(cursor: &C) -> CursorResult<()> {
    if cursor.is_finished() {
        return Err(CursorError::StreamExhausted);
    }
    if !cursor.is_valid() {
        return Err(CursorError::IllegalState("cursor not yet advanced".to_string()));
    }
    Ok(())
}

/// A cursor is initialized once it has advanced successfully at least once,
/// or has finished.
pub fn is_initialized<C: Cursor + ?Sized>(cursor: &C) -> bool {
    cursor.is_valid() || cursor.is_finished()
}
