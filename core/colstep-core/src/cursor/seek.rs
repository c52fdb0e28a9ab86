//! Position Seek — forward seeking by value runs, then by positions.
//!
//! Seeking is synthesized from `advance_next_value` and
//! `advance_next_position` only; the coarse `advance_to_position` primitive is
//! never called. For run-length or dictionary encoded sources a single
//! `advance_next_value` skips a whole run, so the number of calls is bounded
//! by the runs crossed plus the offset inside the target run.
//!
//! ```text
//! positions   0   1   2 | 3   4   5 | 6 ...
//! values      x   x   x | y   y   y | z
//!
//! seek(4):    bootstrap ─▶ 0      (end of run = 2 < 4)
//!             next value ─▶ 3     (end of run = 5 ≥ 4)
//!             next position ─▶ 4
//! ```

use super::validate::is_initialized;
use super::{AdvanceResult, Cursor};
use crate::error::{CursorError, CursorResult};
use tracing::trace;

/// Advance `cursor` forward until it is positioned at `target`.
///
/// Returns `Success` once `position() == target`, or the first `MustYield` /
/// `Finished` reported by the cursor. After `MustYield` the call can be
/// re-issued with the same target and resumes where it stopped.
///
/// Fails with `InvalidArgument` when `target` is negative or lies behind the
/// current position of an initialized cursor.
pub fn seek_to_position<C: Cursor + ?Sized>(
    cursor: &mut C,
    target: i64,
) -> CursorResult<AdvanceResult> {
    if target < 0 {
        return Err(CursorError::InvalidArgument(format!(
            "seek target must be at least zero, got {target}"
        )));
    }

    if cursor.is_finished() {
        return Ok(AdvanceResult::Finished);
    }

    if is_initialized(cursor) {
        let current = cursor.position()?;
        if target < current {
            return Err(CursorError::InvalidArgument(format!(
                "must advance forward: target {target} is behind current position {current}"
            )));
        }
    } else {
        let result = cursor.advance_next_position();
        if result != AdvanceResult::Success {
            trace!(?result, target, "seek stopped during bootstrap");
            return Ok(result);
        }
    }

    while cursor.current_value_end_position()? < target {
        let result = cursor.advance_next_value();
        if result != AdvanceResult::Success {
            trace!(?result, target, "seek stopped while skipping value runs");
            return Ok(result);
        }
    }

    while cursor.position()? < target {
        let result = cursor.advance_next_position();
        if result != AdvanceResult::Success {
            trace!(?result, target, "seek stopped while skipping positions");
            return Ok(result);
        }
    }

    Ok(AdvanceResult::Success)
}
