//! Position ordering and borrowed position views.

use super::validate::check_readable;
use super::{Cursor, current_row_equals, current_tuple};
use crate::error::CursorResult;
use crate::tuple::Tuple;
use crate::types::TupleSchema;
use std::cmp::Ordering;

/// Order two readable cursors by current position.
pub fn compare_by_position<A, B>(left: &A, right: &B) -> CursorResult<Ordering>
where
    A: Cursor + ?Sized,
    B: Cursor + ?Sized,
{
    Ok(left.position()?.cmp(&right.position()?))
}

/// Sort readable cursors by ascending current position.
///
/// Positions are read up front, so an unreadable cursor fails the whole sort
/// before anything is reordered.
pub fn sort_by_position<C: Cursor>(cursors: &mut [C]) -> CursorResult<()> {
    let positions = cursors
        .iter()
        .map(|c| c.position())
        .collect::<CursorResult<Vec<i64>>>()?;

    let mut order: Vec<usize> = (0..cursors.len()).collect();
    order.sort_by_key(|&i| positions[i]);

    // apply the permutation in place, cycle by cycle
    let mut placed = vec![false; cursors.len()];
    for start in 0..order.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let next = order[current];
            if placed[next] {
                break;
            }
            cursors.swap(current, next);
            current = next;
        }
    }
    Ok(())
}

/// Read-only view of a cursor's current position.
///
/// Construction checks readability, so every accessor reads a positioned
/// cursor; the borrow keeps the cursor from moving while the view lives.
pub struct StreamPosition<'a, C: Cursor + ?Sized> {
    cursor: &'a C,
}

impl<'a, C: Cursor + ?Sized> StreamPosition<'a, C> {
    pub fn new(cursor: &'a C) -> CursorResult<Self> {
        check_readable(cursor)?;
        Ok(Self { cursor })
    }

    pub fn schema(&self) -> &TupleSchema {
        self.cursor.schema()
    }

    pub fn position(&self) -> CursorResult<i64> {
        self.cursor.position()
    }

    pub fn current_value_end_position(&self) -> CursorResult<i64> {
        self.cursor.current_value_end_position()
    }

    /// Materialize the row at this position.
    pub fn to_tuple(&self) -> CursorResult<Tuple> {
        current_tuple(self.cursor)
    }

    pub fn equals(&self, tuple: &Tuple) -> CursorResult<bool> {
        current_row_equals(self.cursor, tuple)
    }
}
