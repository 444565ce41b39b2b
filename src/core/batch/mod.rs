//! CSV batch input: loading and per-row validation

pub mod loader;
pub mod mapper;

pub use loader::{BatchFile, BatchLoader, BatchReadError, RawRow};
pub use mapper::{RowValidationError, ValidationReason, columns, map_row};
