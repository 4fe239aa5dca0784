//! Error types for store and executor operations.

use thiserror::Error;

/// Errors that can occur while talking to the backing store.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Table, row or procedure not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate key.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Handle used in the wrong lifecycle state (closed, or opened twice).
    #[error("Invalid handle state: {0}")]
    InvalidState(String),

    /// Bound parameters do not match the procedure's formal list.
    #[error("Procedure {procedure} expects {expected} parameters, got {got}")]
    ParameterMismatch {
        procedure: String,
        expected: usize,
        got: usize,
    },

    /// Invalid definition (unknown column, unknown parameter, ...).
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Config parse error.
    #[error("Config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
