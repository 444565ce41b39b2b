//! Utility modules
//!
//! - **error**: crate error type and retry with backoff
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;
