//! Configuration data models

#![allow(missing_docs)]

pub mod aws;
pub mod client;
pub mod executor;

// Re-export all configuration types
pub use aws::*;
pub use client::*;
pub use executor::*;

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default number of rows in flight
pub fn default_concurrency() -> usize {
    1
}
