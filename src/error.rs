//! Error types for result set access.

use thiserror::Error;

use crate::config::FetchMode;

/// Result type alias for result set operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed failure reported by the upstream driver while pulling a row.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for result set operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No column with this name exists in the result.
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    /// Column ordinal out of bounds.
    #[error("Column index {index} out of bounds (columns: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Row index out of bounds for a buffered result.
    #[error("Row index {index} out of bounds (rows: {count})")]
    RowOutOfRange { index: usize, count: usize },

    /// Field access while the cursor is not on a row.
    #[error("Cursor is not positioned on a row")]
    CursorNotPositioned,

    /// Column has a wire type this crate cannot decode.
    #[error("Unsupported column type {type_code} in column {column}")]
    UnsupportedColumnType { column: String, type_code: u8 },

    /// Operation not available in the result set's fetch mode.
    #[error("{operation} is not supported in {mode} mode")]
    UnsupportedOperation {
        operation: &'static str,
        mode: FetchMode,
    },

    /// Column metadata from the driver is unusable.
    #[error("Malformed column metadata: {message}")]
    MalformedMetadata { message: String },

    /// Row width does not match the column count.
    #[error("Malformed row: expected {expected} fields, got {actual}")]
    MalformedRow { expected: usize, actual: usize },

    /// Field bytes do not form a valid value for the column type.
    #[error("Invalid value in column {column}: {message}")]
    InvalidField { column: String, message: String },

    /// Unexpected NULL while extracting a non-optional value.
    #[error("Unexpected NULL value in column {column}")]
    NullValue { column: String },

    /// Type conversion error.
    #[error("Type conversion error: {message}")]
    TypeConversion { message: String },

    /// Buffered mode would hold more rows than allowed.
    #[error("Result exceeds the buffered row limit of {limit}")]
    BufferLimitExceeded { limit: usize },

    /// Lower-level failure while fetching the next row.
    #[error("Driver error: {0}")]
    Driver(#[source] DriverError),
}

impl Error {
    /// Create a type conversion error.
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion {
            message: message.into(),
        }
    }

    /// Create a malformed metadata error.
    pub fn malformed_metadata(message: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            message: message.into(),
        }
    }

    /// Wrap a driver failure.
    pub fn driver(err: impl Into<DriverError>) -> Self {
        Self::Driver(err.into())
    }

    /// Attach a column name to a column-agnostic conversion error.
    ///
    /// `TypeConversion` becomes `InvalidField` and an anonymous `NullValue`
    /// gets the column filled in. Other errors pass through unchanged.
    pub(crate) fn for_column(self, column: &str) -> Self {
        match self {
            Self::TypeConversion { message } => Self::InvalidField {
                column: column.to_string(),
                message,
            },
            Self::NullValue { column: c } if c.is_empty() => Self::NullValue {
                column: column.to_string(),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_column_rewrites_conversion_errors() {
        let err = Error::type_conversion("bad digits").for_column("ID");
        match err {
            Error::InvalidField { column, message } => {
                assert_eq!(column, "ID");
                assert_eq!(message, "bad digits");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }

        let err = Error::NullValue {
            column: String::new(),
        }
        .for_column("NAME");
        assert!(matches!(err, Error::NullValue { column } if column == "NAME"));

        let err = Error::CursorNotPositioned.for_column("ID");
        assert!(matches!(err, Error::CursorNotPositioned));
    }

    #[test]
    fn test_driver_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = Error::driver(io);
        assert_eq!(err.to_string(), "Driver error: reset by peer");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = Error::UnsupportedOperation {
            operation: "reset",
            mode: FetchMode::Streaming,
        };
        assert_eq!(err.to_string(), "reset is not supported in streaming mode");
    }
}
