//! Identity directory access

pub mod error;
pub mod gateway;
pub mod identitystore;

pub use error::DirectoryError;
pub use gateway::DirectoryGateway;
pub use identitystore::IdentityStoreClient;

#[cfg(test)]
pub use gateway::MockDirectoryGateway;
