//! Batch pipeline: load, validate, execute, report

pub mod batch;
pub mod directory;
pub mod executor;
pub mod report;
pub mod resolver;
pub mod types;
