//! Error types for mc-db

use thiserror::Error;

/// Remote query errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Bearer token not available (D001)
    #[error("[D001] {var} not set. Export it first.")]
    MissingCredential { var: String },

    /// No project reference configured (D002)
    #[error("[D002] No project reference: set api.project_ref in config or pass --project-ref")]
    MissingProjectRef,

    /// Request could not be sent or timed out (D003)
    #[error("[D003] Request to management API failed: {0}")]
    Transport(String),

    /// Response body could not be read (D004)
    #[error("[D004] Invalid response from management API: {0}")]
    InvalidResponse(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<reqwest::Error> for DbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() {
            DbError::InvalidResponse(err.to_string())
        } else {
            DbError::Transport(err.to_string())
        }
    }
}
