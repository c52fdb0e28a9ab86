//! Field types and tuple schemas.
//!
//! The set of field types is closed: every dispatch over [`FieldType`] is an
//! exhaustive `match`, so adding a type is a compile-time checked change.

use arrow::datatypes::{DataType, Field, Schema};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Type tag of a single tuple field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 64-bit signed integer
    Int64,
    /// IEEE 754 double
    Float64,
    /// Variable-length byte sequence
    VariableBytes,
}

impl FieldType {
    /// Arrow data type used when this field is stored in a block.
    pub fn data_type(&self) -> DataType {
        match self {
            FieldType::Int64 => DataType::Int64,
            FieldType::Float64 => DataType::Float64,
            FieldType::VariableBytes => DataType::Binary,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Int64 => "Int64",
            FieldType::Float64 => "Float64",
            FieldType::VariableBytes => "VariableBytes",
        };
        f.write_str(name)
    }
}

/// Ordered sequence of field types describing a tuple.
///
/// Clones share the underlying field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleSchema {
    types: Arc<SmallVec<[FieldType; 4]>>,
}

impl TupleSchema {
    /// Create a schema from its field types, in order.
    pub fn new(types: impl IntoIterator<Item = FieldType>) -> Self {
        Self {
            types: Arc::new(types.into_iter().collect()),
        }
    }

    /// Single-field schema.
    pub fn single(field_type: FieldType) -> Self {
        Self::new([field_type])
    }

    pub fn field_count(&self) -> usize {
        self.types.len()
    }

    /// Field types in schema order.
    pub fn types(&self) -> &[FieldType] {
        &self.types
    }

    /// Type of `field`, or `None` if the index is out of range.
    pub fn field_type(&self, field: usize) -> Option<FieldType> {
        self.types.get(field).copied()
    }

    /// Arrow schema with columns named `f0`, `f1`, ...
    pub fn to_arrow_schema(&self) -> Schema {
        let fields: Vec<Field> = self
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| Field::new(format!("f{i}"), t.data_type(), false))
            .collect();
        Schema::new(fields)
    }
}

impl fmt::Display for TupleSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, t) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{t}")?;
        }
        f.write_str("]")
    }
}
