//! # colstep — Cursor Advancement Protocol
//!
//! Stepping, seeking, materialization and comparison over position-ordered,
//! typed row cursors, as used in the innermost loop of columnar query
//! execution.
//!
//! Every advance returns an [`AdvanceResult`]: `Success`, `MustYield` (budget
//! exhausted, retry the same call later) or `Finished`. Yield points are plain
//! return values, so no async machinery is involved.
//!
//! ## Quick start
//!
//! ```rust
//! use colstep_core::cursor::{AdvanceResult, Cursor, current_row_equals, seek_to_position};
//! use colstep_core::memory::RunLengthCursor;
//! use colstep_core::tuple::Tuple;
//! use colstep_core::types::{FieldType, TupleSchema};
//!
//! # fn main() -> colstep_core::CursorResult<()> {
//! // positions 0-2 → "x", 3-5 → "y"
//! let mut cursor = RunLengthCursor::from_runs(
//!     TupleSchema::single(FieldType::VariableBytes),
//!     [
//!         (Tuple::from_values(["x".into()]), 3),
//!         (Tuple::from_values(["y".into()]), 3),
//!     ],
//! )?;
//!
//! assert_eq!(seek_to_position(&mut cursor, 4)?, AdvanceResult::Success);
//! assert_eq!(cursor.position()?, 4);
//! assert!(current_row_equals(&cursor, &Tuple::from_values(["y".into()]))?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cursor`] — the [`Cursor`] trait and the algorithms over it
//! - [`types`] — [`FieldType`] and [`TupleSchema`]
//! - [`tuple`] — materialized [`Tuple`]s and [`TupleBuilder`]
//! - [`block`] — Arrow-backed [`BlockBuilder`]
//! - [`builder`] — the [`FieldSink`] trait shared by builders
//! - [`memory`] — in-memory [`RunLengthCursor`]
//! - [`config`] — [`CursorConfig`]

pub mod block;
pub mod builder;
pub mod config;
pub mod cursor;
pub mod error;
pub mod memory;
pub mod tuple;
pub mod types;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use block::BlockBuilder;
pub use builder::FieldSink;
pub use config::CursorConfig;
pub use cursor::{AdvanceResult, Cursor};
pub use error::{CursorError, CursorResult};
pub use memory::{AdvanceStats, RunLengthCursor};
pub use tuple::{FieldValue, Tuple, TupleBuilder};
pub use types::{FieldType, TupleSchema};
