//! Error recovery
//!
//! Retry with exponential backoff for transient directory failures.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::{RetryConfig, Retryable};
