//! Error types for dynproxy-core

use crate::{Operation, ValueType};
use thiserror::Error;

/// Boxed underlying cause kept for diagnostics
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dispatch error type
///
/// Every variant is an ordinary "not resolved" answer: dispatch never panics
/// on a miss.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is not supported by this object")]
    NotSupported(Operation),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Table not found: {table}")]
    TableNotFound {
        table: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("Parameter count mismatch for {procedure}: expected {expected}, got {got}")]
    ParameterCountMismatch {
        procedure: String,
        expected: usize,
        got: usize,
    },

    #[error("Index {index} out of range for {count} rows")]
    IndexOutOfRange { index: i64, count: usize },

    #[error("Unsupported index shape: {0}")]
    UnsupportedIndexShape(String),

    #[error("Conversion failure: cannot convert {from} to {to}")]
    ConversionFailure { from: String, to: ValueType },

    /// The executor error is reachable through `source()` only; the message
    /// never carries it.
    #[error("Invocation of {procedure} failed")]
    InvocationFailure {
        procedure: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

impl Error {
    /// Create a TableNotFound error for a plain catalog miss
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Error::TableNotFound {
            table: table.into(),
            cause: None,
        }
    }

    /// Create an InvocationFailure wrapping the executor's error
    pub fn invocation_failure(
        procedure: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Error::InvocationFailure {
            procedure: procedure.into(),
            cause: Some(cause.into()),
        }
    }

    /// True when the object simply does not support the operation
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
