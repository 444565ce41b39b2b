//! Error types for the bulk operator
//!
//! Row-scoped failures never reach this type: they become failed row
//! outcomes. `BulkError` covers what stops a run before rows are processed.

use crate::core::batch::BatchReadError;
use crate::core::directory::DirectoryError;
use thiserror::Error;

/// Result type alias for the bulk operator
pub type Result<T> = std::result::Result<T, BulkError>;

/// Main error type for the bulk operator
#[derive(Error, Debug)]
pub enum BulkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch file could not be read
    #[error(transparent)]
    BatchRead(#[from] BatchReadError),

    /// Directory client could not be built
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}

impl BulkError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
