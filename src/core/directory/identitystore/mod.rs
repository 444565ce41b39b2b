//! AWS IAM Identity Center identity store
//!
//! AWS JSON 1.1 client signed with SigV4.

pub mod auth;
pub mod client;
pub mod error;
pub mod sigv4;
pub mod wire;

/// SigV4 signing name of the identity store service
pub const SERVICE_NAME: &str = "identitystore";

pub use auth::AwsCredentials;
pub use client::IdentityStoreClient;
pub use error::IdentityStoreErrorMapper;
pub use sigv4::SigV4Signer;
