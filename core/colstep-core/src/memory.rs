//! In-memory run-length cursor.
//!
//! Stores rows as value runs (`Tuple`, run length); adjacent bit-identical
//! values are merged so every run is maximal. Implements the full [`Cursor`] contract,
//! including a simulated scheduling budget ([`CursorConfig::yield_interval`])
//! and per-primitive call counters ([`AdvanceStats`]).

use crate::config::CursorConfig;
use crate::cursor::{AdvanceResult, Cursor};
use crate::error::{CursorError, CursorResult};
use crate::tuple::Tuple;
use crate::types::TupleSchema;
use std::num::NonZeroU32;
use tracing::trace;

/// Number of calls made to each advance primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceStats {
    pub next_position: u64,
    pub next_value: u64,
    pub to_position: u64,
    /// Calls answered with `MustYield`
    pub yields: u64,
}

#[derive(Debug, Clone)]
struct Run {
    value: Tuple,
    start: i64,
    /// Inclusive
    end: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Valid { run: usize, position: i64 },
    Finished,
}

/// Cursor over value runs held in memory.
#[derive(Debug, Clone)]
pub struct RunLengthCursor {
    schema: TupleSchema,
    runs: Vec<Run>,
    state: State,
    yield_interval: Option<NonZeroU32>,
    /// Advance calls left before the next yield
    budget: u32,
    stats: AdvanceStats,
}

impl RunLengthCursor {
    /// Cursor with no rows; the first advance finishes it.
    pub fn empty(schema: TupleSchema) -> Self {
        Self {
            schema,
            runs: Vec::new(),
            state: State::Uninitialized,
            yield_interval: None,
            budget: 0,
            stats: AdvanceStats::default(),
        }
    }

    /// Build from `(value, run length)` pairs. Every value must match
    /// `schema` and every length must be positive.
    pub fn from_runs(
        schema: TupleSchema,
        runs: impl IntoIterator<Item = (Tuple, u64)>,
    ) -> CursorResult<Self> {
        let mut cursor = Self::empty(schema);
        for (value, length) in runs {
            cursor.push_run(value, length)?;
        }
        Ok(cursor)
    }

    /// Build from individual rows; the schema is taken from the first row.
    pub fn from_rows(rows: impl IntoIterator<Item = Tuple>) -> CursorResult<Self> {
        let mut rows = rows.into_iter().peekable();
        let schema = rows
            .peek()
            .map(|row| row.schema().clone())
            .ok_or_else(|| {
                CursorError::Schema("cannot infer a schema from zero rows".to_string())
            })?;
        Self::from_rows_with_schema(schema, rows)
    }

    pub fn from_rows_with_schema(
        schema: TupleSchema,
        rows: impl IntoIterator<Item = Tuple>,
    ) -> CursorResult<Self> {
        Self::from_runs(schema, rows.into_iter().map(|row| (row, 1)))
    }

    pub fn with_config(mut self, config: CursorConfig) -> Self {
        self.yield_interval = config.yield_interval.and_then(NonZeroU32::new);
        self.budget = 0;
        self
    }

    pub fn stats(&self) -> AdvanceStats {
        self.stats
    }

    /// Total number of positions.
    pub fn row_count(&self) -> u64 {
        self.runs.last().map_or(0, |r| (r.end + 1) as u64)
    }

    /// Number of maximal value runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    fn push_run(&mut self, value: Tuple, length: u64) -> CursorResult<()> {
        if value.schema() != &self.schema {
            return Err(CursorError::Schema(format!(
                "run value has schema {}, cursor has {}",
                value.schema(),
                self.schema
            )));
        }
        if length == 0 {
            return Err(CursorError::Schema("run length must be positive".to_string()));
        }
        let length = i64::try_from(length)
            .map_err(|_| CursorError::Schema(format!("run length {length} too large")))?;

        let start = match self.runs.last_mut() {
            Some(last) if last.value.identical(&value) => {
                last.end = run_end(last.end + 1, length)?;
                return Ok(());
            }
            Some(last) => last.end + 1,
            None => 0,
        };
        let end = run_end(start, length)?;
        self.runs.push(Run { value, start, end });
        Ok(())
    }

    /// Consume one unit of budget; `true` means this call must yield.
    fn must_yield(&mut self) -> bool {
        let Some(interval) = self.yield_interval else {
            return false;
        };
        if self.budget == 0 {
            self.budget = interval.get();
            self.stats.yields += 1;
            return true;
        }
        self.budget -= 1;
        false
    }

    /// Move to `run` at `position`, or finish if `run` does not exist.
    fn enter(&mut self, run: usize, position: i64) -> AdvanceResult {
        if run >= self.runs.len() {
            trace!(rows = self.row_count(), "cursor finished");
            self.state = State::Finished;
            return AdvanceResult::Finished;
        }
        self.state = State::Valid { run, position };
        AdvanceResult::Success
    }

    fn current_run(&self) -> CursorResult<(&Run, i64)> {
        match self.state {
            State::Valid { run, position } => {
                let current = self.runs.get(run).ok_or_else(|| {
                    CursorError::InternalInvariant(format!("cursor points at missing run {run}"))
                })?;
                Ok((current, position))
            }
            State::Finished => Err(CursorError::StreamExhausted),
            State::Uninitialized => Err(CursorError::IllegalState(
                "cursor not yet advanced".to_string(),
            )),
        }
    }
}

/// Last position of a run of `length` rows starting at `start`.
///
/// The row count must itself fit in an `i64`, so the last position stays below
/// `i64::MAX`.
fn run_end(start: i64, length: i64) -> CursorResult<i64> {
    start
        .checked_add(length)
        .map(|next| next - 1)
        .ok_or_else(|| CursorError::Schema("row count overflows i64".to_string()))
}

impl Cursor for RunLengthCursor {
    fn schema(&self) -> &TupleSchema {
        &self.schema
    }

    fn advance_next_position(&mut self) -> AdvanceResult {
        self.stats.next_position += 1;
        if self.state == State::Finished {
            return AdvanceResult::Finished;
        }
        if self.must_yield() {
            return AdvanceResult::MustYield;
        }
        let state = self.state;
        match state {
            State::Valid { run, position } if position < self.runs[run].end => {
                self.enter(run, position + 1)
            }
            State::Valid { run, position } => self.enter(run + 1, position + 1),
            _ => self.enter(0, 0),
        }
    }

    fn advance_next_value(&mut self) -> AdvanceResult {
        self.stats.next_value += 1;
        if self.state == State::Finished {
            return AdvanceResult::Finished;
        }
        if self.must_yield() {
            return AdvanceResult::MustYield;
        }
        let state = self.state;
        match state {
            State::Valid { run, .. } => {
                let start = self.runs.get(run + 1).map_or(0, |r| r.start);
                self.enter(run + 1, start)
            }
            _ => self.enter(0, 0),
        }
    }

    fn advance_to_position(&mut self, position: i64) -> AdvanceResult {
        self.stats.to_position += 1;
        if self.state == State::Finished {
            return AdvanceResult::Finished;
        }
        if self.must_yield() {
            return AdvanceResult::MustYield;
        }
        if let State::Valid { position: current, .. } = self.state {
            if position <= current {
                return AdvanceResult::Success;
            }
        }
        let position = position.max(0);
        let run = self.runs.partition_point(|r| r.end < position);
        self.enter(run, position)
    }

    fn is_valid(&self) -> bool {
        matches!(self.state, State::Valid { .. })
    }

    fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    fn position(&self) -> CursorResult<i64> {
        self.current_run().map(|(_, position)| position)
    }

    fn current_value_end_position(&self) -> CursorResult<i64> {
        self.current_run().map(|(run, _)| run.end)
    }

    fn get_i64(&self, field: usize) -> CursorResult<i64> {
        self.current_run()?.0.value.get_i64(field)
    }

    fn get_f64(&self, field: usize) -> CursorResult<f64> {
        self.current_run()?.0.value.get_f64(field)
    }

    fn get_bytes(&self, field: usize) -> CursorResult<&[u8]> {
        self.current_run()?.0.value.get_bytes(field)
    }
}
