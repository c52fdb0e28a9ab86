//! Cursor contract — position-ordered, typed, interruptible row streams.
//!
//! A cursor is in exactly one of three states:
//!
//! ```text
//! uninitialized ──advance Success──▶ valid ──advance Finished──▶ finished
//!       └────────────advance Finished───────────────────────────────▲
//! ```
//!
//! Every advance primitive returns an [`AdvanceResult`]. `MustYield` leaves the
//! cursor untouched; the caller re-issues the identical call later.
//!
//! ## Algorithms
//!
//! - [`strict`] — no-yield wrappers and multi-cursor stepping
//! - [`seek`] — forward seeking by value runs, then positions
//! - [`materialize`] — copy the current row into a [`FieldSink`](crate::builder::FieldSink)
//! - [`equality`] — compare the current row with a [`Tuple`](crate::tuple::Tuple)
//! - [`validate`] — readability checks
//! - [`position`] — ordering and borrowed position views

pub mod equality;
pub mod materialize;
pub mod position;
pub mod seek;
pub mod strict;
pub mod validate;

use crate::error::CursorResult;
use crate::types::TupleSchema;

pub use equality::{current_field_equals, current_row_equals};
pub use materialize::{append_current_field, append_current_row, current_tuple};
pub use position::{StreamPosition, compare_by_position, sort_by_position};
pub use seek::seek_to_position;
pub use strict::{
    GroupAdvance, advance_next_position_all, advance_next_position_all_detailed,
    advance_next_position_no_yield, advance_next_value_no_yield, advance_to_position_no_yield,
};
pub use validate::{check_readable, is_initialized};

/// Outcome of every stepping operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum AdvanceResult {
    /// Positioned at new, valid data
    Success,
    /// Budget exhausted; state unchanged, retry the same call later
    MustYield,
    /// Stream exhausted (terminal)
    Finished,
}

impl AdvanceResult {
    pub fn is_success(self) -> bool {
        self == AdvanceResult::Success
    }

    pub fn is_finished(self) -> bool {
        self == AdvanceResult::Finished
    }

    pub fn must_yield(self) -> bool {
        self == AdvanceResult::MustYield
    }
}

/// Capability implemented by every concrete data source.
///
/// Positions are absolute and 0-based. State and field accessors return
/// `StreamExhausted` on a finished cursor and `IllegalState` on one that has
/// never been advanced.
pub trait Cursor {
    fn schema(&self) -> &TupleSchema;

    /// Move to the next row position.
    fn advance_next_position(&mut self) -> AdvanceResult;

    /// Move to the first position of the next distinct value, skipping the
    /// rest of the current value run.
    fn advance_next_value(&mut self) -> AdvanceResult;

    /// Move directly to absolute `position`, which must not be behind the
    /// current position.
    fn advance_to_position(&mut self, position: i64) -> AdvanceResult;

    /// True once advanced successfully and not finished.
    fn is_valid(&self) -> bool;

    /// True once the stream is exhausted. Never true together with `is_valid`.
    fn is_finished(&self) -> bool;

    fn position(&self) -> CursorResult<i64>;

    /// Last position still covered by the current value run.
    fn current_value_end_position(&self) -> CursorResult<i64>;

    fn get_i64(&self, field: usize) -> CursorResult<i64>;

    fn get_f64(&self, field: usize) -> CursorResult<f64>;

    fn get_bytes(&self, field: usize) -> CursorResult<&[u8]>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn schema(&self) -> &TupleSchema {
        (**self).schema()
    }

    fn advance_next_position(&mut self) -> AdvanceResult {
        (**self).advance_next_position()
    }

    fn advance_next_value(&mut self) -> AdvanceResult {
        (**self).advance_next_value()
    }

    fn advance_to_position(&mut self, position: i64) -> AdvanceResult {
        (**self).advance_to_position(position)
    }

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn position(&self) -> CursorResult<i64> {
        (**self).position()
    }

    fn current_value_end_position(&self) -> CursorResult<i64> {
        (**self).current_value_end_position()
    }

    fn get_i64(&self, field: usize) -> CursorResult<i64> {
        (**self).get_i64(field)
    }

    fn get_f64(&self, field: usize) -> CursorResult<f64> {
        (**self).get_f64(field)
    }

    fn get_bytes(&self, field: usize) -> CursorResult<&[u8]> {
        (**self).get_bytes(field)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn schema(&self) -> &TupleSchema {
        (**self).schema()
    }

    fn advance_next_position(&mut self) -> AdvanceResult {
        (**self).advance_next_position()
    }

    fn advance_next_value(&mut self) -> AdvanceResult {
        (**self).advance_next_value()
    }

    fn advance_to_position(&mut self, position: i64) -> AdvanceResult {
        (**self).advance_to_position(position)
    }

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn position(&self) -> CursorResult<i64> {
        (**self).position()
    }

    fn current_value_end_position(&self) -> CursorResult<i64> {
        (**self).current_value_end_position()
    }

    fn get_i64(&self, field: usize) -> CursorResult<i64> {
        (**self).get_i64(field)
    }

    fn get_f64(&self, field: usize) -> CursorResult<f64> {
        (**self).get_f64(field)
    }

    fn get_bytes(&self, field: usize) -> CursorResult<&[u8]> {
        (**self).get_bytes(field)
    }
}
