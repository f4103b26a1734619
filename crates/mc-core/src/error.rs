//! Error types for mc-core

use thiserror::Error;

/// Core error type for migcheck
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Suite name not present in config
    #[error("[C004] Unknown suite '{name}'. Available suites: {available}")]
    UnknownSuite { name: String, available: String },

    /// C005: Migration file does not exist
    #[error("[C005] Migration file not found at {path}")]
    MigrationNotFound { path: String },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
