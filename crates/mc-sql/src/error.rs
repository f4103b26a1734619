//! Error types for mc-sql

use thiserror::Error;

/// Errors raised while preparing a validation run
#[derive(Error, Debug)]
pub enum SqlError {
    /// Invalid user-supplied pattern (S001)
    #[error("[S001] Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
