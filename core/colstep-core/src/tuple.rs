//! Materialized tuples.
//!
//! A [`Tuple`] is an immutable row owned independently of any cursor.
//! [`TupleBuilder`] fills one field at a time in schema order.

use crate::builder::{FieldSink, expect_field};
use crate::error::{CursorError, CursorResult};
use crate::types::{FieldType, TupleSchema};
use smallvec::SmallVec;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int64(i64),
    Float64(f64),
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::Float64(_) => FieldType::Float64,
            FieldValue::Bytes(_) => FieldType::VariableBytes,
        }
    }

    /// Bit-for-bit equality: unlike `==`, `-0.0` differs from `0.0` and a
    /// `NaN` matches a `NaN` with the same payload.
    pub fn identical(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Int64(a), FieldValue::Int64(b)) => a == b,
            (FieldValue::Float64(a), FieldValue::Float64(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Bytes(a), FieldValue::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float64(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Bytes(value.to_vec())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Bytes(value.as_bytes().to_vec())
    }
}

/// Immutable materialized row conforming to a [`TupleSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    schema: TupleSchema,
    values: SmallVec<[FieldValue; 4]>,
}

impl Tuple {
    /// Build a tuple from values, checking them against `schema`.
    pub fn new(
        schema: TupleSchema,
        values: impl IntoIterator<Item = FieldValue>,
    ) -> CursorResult<Self> {
        let values: SmallVec<[FieldValue; 4]> = values.into_iter().collect();
        if values.len() != schema.field_count() {
            return Err(CursorError::Schema(format!(
                "expected {} fields, got {}",
                schema.field_count(),
                values.len()
            )));
        }
        for (field, (value, &expected)) in values.iter().zip(schema.types()).enumerate() {
            if value.field_type() != expected {
                return Err(CursorError::TypeMismatch {
                    field,
                    expected,
                    actual: value.field_type(),
                });
            }
        }
        Ok(Self { schema, values })
    }

    /// Build a tuple whose schema is inferred from the values.
    pub fn from_values(values: impl IntoIterator<Item = FieldValue>) -> Self {
        let values: SmallVec<[FieldValue; 4]> = values.into_iter().collect();
        let schema = TupleSchema::new(values.iter().map(FieldValue::field_type));
        Self { schema, values }
    }

    pub fn schema(&self) -> &TupleSchema {
        &self.schema
    }

    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Same schema and every value [`identical`](FieldValue::identical).
    pub fn identical(&self, other: &Tuple) -> bool {
        self.schema == other.schema
            && self.values.iter().zip(&other.values).all(|(a, b)| a.identical(b))
    }

    pub fn get_i64(&self, field: usize) -> CursorResult<i64> {
        match self.value(field)? {
            FieldValue::Int64(v) => Ok(*v),
            other => Err(mismatch(field, FieldType::Int64, other)),
        }
    }

    pub fn get_f64(&self, field: usize) -> CursorResult<f64> {
        match self.value(field)? {
            FieldValue::Float64(v) => Ok(*v),
            other => Err(mismatch(field, FieldType::Float64, other)),
        }
    }

    pub fn get_bytes(&self, field: usize) -> CursorResult<&[u8]> {
        match self.value(field)? {
            FieldValue::Bytes(v) => Ok(v.as_slice()),
            other => Err(mismatch(field, FieldType::VariableBytes, other)),
        }
    }

    fn value(&self, field: usize) -> CursorResult<&FieldValue> {
        self.values.get(field).ok_or_else(|| {
            CursorError::InvalidArgument(format!(
                "field {field} out of range for tuple with {} fields",
                self.values.len()
            ))
        })
    }
}

fn mismatch(field: usize, expected: FieldType, actual: &FieldValue) -> CursorError {
    CursorError::TypeMismatch {
        field,
        expected,
        actual: actual.field_type(),
    }
}

/// Row builder producing a [`Tuple`].
#[derive(Debug)]
pub struct TupleBuilder {
    schema: TupleSchema,
    values: SmallVec<[FieldValue; 4]>,
}

impl TupleBuilder {
    pub fn new(schema: TupleSchema) -> Self {
        Self {
            values: SmallVec::with_capacity(schema.field_count()),
            schema,
        }
    }

    /// Whether every schema field has been appended.
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.schema.field_count()
    }

    /// Seal the builder. Fails if any field is missing.
    pub fn build(self) -> CursorResult<Tuple> {
        if !self.is_complete() {
            return Err(CursorError::IllegalState(format!(
                "tuple is incomplete: {} of {} fields appended",
                self.values.len(),
                self.schema.field_count()
            )));
        }
        Ok(Tuple {
            schema: self.schema,
            values: self.values,
        })
    }

    fn push(&mut self, value: FieldValue) -> CursorResult<()> {
        expect_field(self.schema.types(), self.values.len(), value.field_type())?;
        self.values.push(value);
        Ok(())
    }
}

impl FieldSink for TupleBuilder {
    fn append_i64(&mut self, value: i64) -> CursorResult<()> {
        self.push(FieldValue::Int64(value))
    }

    fn append_f64(&mut self, value: f64) -> CursorResult<()> {
        self.push(FieldValue::Float64(value))
    }

    fn append_bytes(&mut self, value: &[u8]) -> CursorResult<()> {
        self.push(FieldValue::Bytes(value.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_schema() -> TupleSchema {
        TupleSchema::new([
            FieldType::Int64,
            FieldType::Float64,
            FieldType::VariableBytes,
        ])
    }

    #[test]
    fn test_identical_distinguishes_float_bits() {
        let zero = Tuple::from_values([0.0f64.into()]);
        let negative_zero = Tuple::from_values([(-0.0f64).into()]);
        assert_eq!(zero, negative_zero);
        assert!(!zero.identical(&negative_zero));

        let nan = Tuple::from_values([f64::NAN.into()]);
        assert_ne!(nan, nan.clone());
        assert!(nan.identical(&nan.clone()));

        let int = Tuple::from_values([1i64.into()]);
        assert!(!int.identical(&Tuple::from_values([1.0f64.into()])));
    }

    #[test]
    fn test_builder_builds_tuple() {
        let mut builder = TupleBuilder::new(mixed_schema());
        builder.append_i64(42).unwrap();
        builder.append_f64(3.5).unwrap();
        builder.append_bytes(b"ab").unwrap();
        let tuple = builder.build().unwrap();

        assert_eq!(tuple.get_i64(0).unwrap(), 42);
        assert_eq!(tuple.get_f64(1).unwrap(), 3.5);
        assert_eq!(tuple.get_bytes(2).unwrap(), b"ab");
    }

    #[test]
    fn test_builder_rejects_wrong_type() {
        let mut builder = TupleBuilder::new(mixed_schema());
        let err = builder.append_f64(1.0).unwrap_err();
        assert!(matches!(err, CursorError::TypeMismatch { field: 0, .. }));
    }

    #[test]
    fn test_builder_rejects_extra_field() {
        let mut builder = TupleBuilder::new(TupleSchema::single(FieldType::Int64));
        builder.append_i64(1).unwrap();
        assert!(matches!(
            builder.append_i64(2),
            Err(CursorError::Schema(_))
        ));
    }

    #[test]
    fn test_build_incomplete_fails() {
        let mut builder = TupleBuilder::new(mixed_schema());
        builder.append_i64(1).unwrap();
        assert!(matches!(
            builder.build(),
            Err(CursorError::IllegalState(_))
        ));
    }

    #[test]
    fn test_tuple_new_checks_schema() {
        let err = Tuple::new(mixed_schema(), [FieldValue::Int64(1)]).unwrap_err();
        assert!(matches!(err, CursorError::Schema(_)));

        let err = Tuple::new(
            mixed_schema(),
            [42i64.into(), "x".into(), "y".into()],
        )
        .unwrap_err();
        assert!(matches!(err, CursorError::TypeMismatch { field: 1, .. }));
    }

    #[test]
    fn test_tuple_accessor_errors() {
        let tuple = Tuple::from_values([FieldValue::Int64(7)]);
        assert!(matches!(
            tuple.get_f64(0),
            Err(CursorError::TypeMismatch { .. })
        ));
        assert!(matches!(
            tuple.get_i64(1),
            Err(CursorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_values_infers_schema() {
        let tuple = Tuple::from_values([1i64.into(), 2.0f64.into(), "z".into()]);
        assert_eq!(tuple.schema(), &mixed_schema());
    }
}
