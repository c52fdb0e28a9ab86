//! No-yield advancement.
//!
//! These wrappers collapse the three-state protocol into a boolean for
//! consumers that run without a scheduling budget. `MustYield` becomes
//! `UnsupportedYield`; `Success` → `true`, `Finished` → `false`.

use super::{AdvanceResult, Cursor};
use crate::error::{CursorError, CursorResult};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

fn no_yield(result: AdvanceResult, operation: &'static str) -> CursorResult<bool> {
    match result {
        AdvanceResult::Success => Ok(true),
        AdvanceResult::Finished => Ok(false),
        AdvanceResult::MustYield => {
            warn!(operation, "cursor requested a yield in a no-yield context");
            Err(CursorError::UnsupportedYield { operation })
        }
    }
}

/// Advance to the next position; `false` once finished.
pub fn advance_next_position_no_yield<C: Cursor + ?Sized>(cursor: &mut C) -> CursorResult<bool> {
    no_yield(cursor.advance_next_position(), "advance_next_position")
}

/// Advance to the next value run; `false` once finished.
pub fn advance_next_value_no_yield<C: Cursor + ?Sized>(cursor: &mut C) -> CursorResult<bool> {
    no_yield(cursor.advance_next_value(), "advance_next_value")
}

/// Jump to `position`; `false` if the stream ends first.
pub fn advance_to_position_no_yield<C: Cursor + ?Sized>(
    cursor: &mut C,
    position: i64,
) -> CursorResult<bool> {
    no_yield(cursor.advance_to_position(position), "advance_to_position")
}

/// Advance every cursor by exactly one position.
///
/// A cursor that fails to advance never stops the remaining cursors from
/// being stepped, so the group stays positionally aligned. Returns `true` only
/// if all advanced; check `is_finished` on each cursor to see which stopped.
pub fn advance_next_position_all<'a, C, I>(cursors: I) -> CursorResult<bool>
where
    C: Cursor + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    Ok(advance_next_position_all_detailed(cursors)?.all_advanced())
}

/// Outcome of stepping a group of cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAdvance {
    /// Number of cursors stepped
    pub stepped: usize,
    /// Indexes (in iteration order) of cursors that did not advance
    pub stopped: SmallVec<[usize; 4]>,
}

impl GroupAdvance {
    pub fn all_advanced(&self) -> bool {
        self.stopped.is_empty()
    }
}

/// Same stepping as [`advance_next_position_all`], also reporting which
/// cursors stopped.
pub fn advance_next_position_all_detailed<'a, C, I>(cursors: I) -> CursorResult<GroupAdvance>
where
    C: Cursor + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    let mut outcome = GroupAdvance::default();
    for (index, cursor) in cursors.into_iter().enumerate() {
        let advanced = advance_next_position_no_yield(cursor)?;
        trace!(index, advanced, "stepped cursor");
        if !advanced {
            outcome.stopped.push(index);
        }
        outcome.stepped += 1;
    }
    if !outcome.all_advanced() {
        debug!(
            stepped = outcome.stepped,
            stopped = outcome.stopped.len(),
            "cursor group stopped advancing"
        );
    }
    Ok(outcome)
}
