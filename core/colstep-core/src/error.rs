//! Error types for the cursor protocol.
//!
//! All public APIs return `CursorResult<T>` — no panics in library code.
//! `MustYield` and `Finished` are ordinary [`AdvanceResult`](crate::cursor::AdvanceResult)
//! outcomes and never appear here.

use crate::types::FieldType;
use thiserror::Error;

/// Unified error type for all cursor operations.
#[derive(Debug, Error)]
pub enum CursorError {
    /// A no-yield wrapper received `MustYield` from its cursor
    #[error("cursor requested caller to yield but yield is not supported here (operation: {operation})")]
    UnsupportedYield { operation: &'static str },

    /// Bad argument (negative or backward seek target, field index out of range)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Field or state access on a finished cursor
    #[error("cursor already finished")]
    StreamExhausted,

    /// Field or state access on a cursor that is not readable yet
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Unreachable dispatch defect
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// A value was appended or read with the wrong type for its field
    #[error("type mismatch at field {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: usize,
        expected: FieldType,
        actual: FieldType,
    },

    /// Row or run does not match the declared schema
    #[error("schema error: {0}")]
    Schema(String),

    /// Apache Arrow error (sealing a block)
    #[error("arrow error: {source}")]
    Arrow {
        #[from]
        source: arrow::error::ArrowError,
    },

    /// Configuration value could not be parsed
    #[error("config error: {0}")]
    Config(String),

    /// Standard I/O error
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Result type alias for all cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

impl From<serde_json::Error> for CursorError {
    fn from(err: serde_json::Error) -> Self {
        CursorError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unsupported_yield() {
        let err = CursorError::UnsupportedYield {
            operation: "advance_next_position",
        };
        assert!(err.to_string().contains("yield is not supported"));
        assert!(err.to_string().contains("advance_next_position"));
    }

    #[test]
    fn error_display_stream_exhausted() {
        let err = CursorError::StreamExhausted;
        assert_eq!(err.to_string(), "cursor already finished");
    }

    #[test]
    fn error_display_type_mismatch() {
        let err = CursorError::TypeMismatch {
            field: 2,
            expected: FieldType::Int64,
            actual: FieldType::VariableBytes,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at field 2: expected Int64, got VariableBytes"
        );
    }

    #[test]
    fn error_display_illegal_state() {
        let err = CursorError::IllegalState("cursor not yet advanced".to_string());
        assert_eq!(err.to_string(), "illegal state: cursor not yet advanced");
    }

    #[test]
    fn config_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: CursorError = json_err.into();
        assert!(matches!(err, CursorError::Config(_)));
    }

    #[test]
    fn cursor_result_err() {
        let result: CursorResult<i64> = Err(CursorError::StreamExhausted);
        assert!(result.is_err());
    }
}
