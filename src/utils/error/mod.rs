//! Error handling utilities
//!
//! Crate-level error type and retry support.

pub mod error;
pub mod recovery;

// Re-export commonly used types
pub use error::{BulkError, Result};
pub use recovery::{RetryConfig, RetryPolicy, Retryable};
