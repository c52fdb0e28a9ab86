//! Block Builder — row-at-a-time appends into Arrow columns.
//!
//! Fields are appended in schema order; after the last field of a row the
//! builder moves on to the next row. `finish()` seals the accumulated rows into
//! an Arrow `RecordBatch`.

use crate::builder::{FieldSink, expect_field};
use crate::error::{CursorError, CursorResult};
use crate::types::{FieldType, TupleSchema};
use arrow::array::{ArrayRef, BinaryBuilder, Float64Builder, Int64Builder};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::sync::Arc;
use tracing::{debug, instrument};

/// One Arrow builder per schema field.
enum ColumnBuilder {
    Int64(Int64Builder),
    Float64(Float64Builder),
    Bytes(BinaryBuilder),
}

impl ColumnBuilder {
    fn new(field_type: FieldType, capacity: usize) -> Self {
        match field_type {
            FieldType::Int64 => ColumnBuilder::Int64(Int64Builder::with_capacity(capacity)),
            FieldType::Float64 => ColumnBuilder::Float64(Float64Builder::with_capacity(capacity)),
            FieldType::VariableBytes => {
                ColumnBuilder::Bytes(BinaryBuilder::with_capacity(capacity, capacity * 16))
            }
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(b) => Arc::new(b.finish()),
            ColumnBuilder::Bytes(b) => Arc::new(b.finish()),
        }
    }
}

/// Columnar output builder over a [`TupleSchema`].
pub struct BlockBuilder {
    schema: TupleSchema,
    columns: Vec<ColumnBuilder>,
    /// Field the next append fills
    next_field: usize,
    /// Completed rows
    row_count: usize,
}

impl BlockBuilder {
    pub fn new(schema: TupleSchema) -> Self {
        Self::with_capacity(schema, 1024)
    }

    /// Create a builder pre-sized for `capacity` rows.
    pub fn with_capacity(schema: TupleSchema, capacity: usize) -> Self {
        let columns = schema
            .types()
            .iter()
            .map(|&t| ColumnBuilder::new(t, capacity))
            .collect();
        Self {
            schema,
            columns,
            next_field: 0,
            row_count: 0,
        }
    }

    pub fn schema(&self) -> &TupleSchema {
        &self.schema
    }

    /// Number of completed rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 && self.next_field == 0
    }

    /// Seal all completed rows into a `RecordBatch` and reset the builder.
    ///
    /// Fails with `IllegalState` while a row is partially appended.
    #[instrument(skip_all)]
    pub fn finish(&mut self) -> CursorResult<RecordBatch> {
        if self.next_field != 0 {
            return Err(CursorError::IllegalState(format!(
                "block has a partial row: {} of {} fields appended",
                self.next_field,
                self.schema.field_count()
            )));
        }

        let arrow_schema = Arc::new(self.schema.to_arrow_schema());
        let arrays: Vec<ArrayRef> = self.columns.iter_mut().map(ColumnBuilder::finish).collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.row_count));
        let batch = RecordBatch::try_new_with_options(arrow_schema, arrays, &options)?;

        debug!(rows = self.row_count, "sealed block");
        self.row_count = 0;
        Ok(batch)
    }

    /// Validate the next field's type and return its column builder.
    fn next_column(&mut self, actual: FieldType) -> CursorResult<(usize, &mut ColumnBuilder)> {
        let field = self.next_field;
        expect_field(self.schema.types(), field, actual)?;
        let column = self.columns.get_mut(field).ok_or_else(|| {
            CursorError::InternalInvariant(format!("no column builder for field {field}"))
        })?;
        Ok((field, column))
    }

    fn field_appended(&mut self) {
        self.next_field += 1;
        if self.next_field == self.schema.field_count() {
            self.next_field = 0;
            self.row_count += 1;
        }
    }
}

fn column_mismatch(field: usize, expected: FieldType) -> CursorError {
    CursorError::InternalInvariant(format!(
        "column builder for field {field} does not hold {expected} values"
    ))
}

impl FieldSink for BlockBuilder {
    fn append_i64(&mut self, value: i64) -> CursorResult<()> {
        match self.next_column(FieldType::Int64)? {
            (_, ColumnBuilder::Int64(b)) => b.append_value(value),
            (field, _) => return Err(column_mismatch(field, FieldType::Int64)),
        }
        self.field_appended();
        Ok(())
    }

    fn append_f64(&mut self, value: f64) -> CursorResult<()> {
        match self.next_column(FieldType::Float64)? {
            (_, ColumnBuilder::Float64(b)) => b.append_value(value),
            (field, _) => return Err(column_mismatch(field, FieldType::Float64)),
        }
        self.field_appended();
        Ok(())
    }

    fn append_bytes(&mut self, value: &[u8]) -> CursorResult<()> {
        match self.next_column(FieldType::VariableBytes)? {
            (_, ColumnBuilder::Bytes(b)) => b.append_value(value),
            (field, _) => return Err(column_mismatch(field, FieldType::VariableBytes)),
        }
        self.field_appended();
        Ok(())
    }
}
