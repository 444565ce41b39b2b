//! # identitystore-bulk
//!
//! Bulk provisioning of AWS IAM Identity Center users from CSV files.
//!
//! A batch file is loaded once, every row is validated into a typed
//! operation and applied through a [`DirectoryGateway`]. Each row ends in
//! exactly one [`RowOutcome`]; a failing row never stops the batch.
//!
//! ```rust,no_run
//! use identitystore_bulk::{BatchExecutor, Config, IdentityStoreClient, IdentityStoreId, OperationKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.apply_env()?;
//!     config.validate()?;
//!
//!     let client = IdentityStoreClient::new(&config)?;
//!     let executor = BatchExecutor::new(client, IdentityStoreId::new("d-1234567890"));
//!     for outcome in executor.run_file(OperationKind::Create, "users.csv").await? {
//!         println!("{}", identitystore_bulk::core::report::render(&outcome));
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::batch::{BatchLoader, BatchReadError, RawRow, RowValidationError};
pub use crate::core::directory::{DirectoryError, DirectoryGateway, IdentityStoreClient};
pub use crate::core::executor::{BatchExecutor, ExecutorOptions};
pub use crate::core::report::{BatchSummary, OutcomeReporter, OutputFormat};
pub use crate::core::types::{
    CreateIdentity, DeleteIdentity, IdentityStoreId, OperationKind, OutcomeStatus, RowOutcome,
};
pub use crate::utils::error::{BulkError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
