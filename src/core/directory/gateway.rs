//! Directory gateway trait
//!
//! The five identity store operations the batch pipeline consumes. The
//! concrete AWS implementation lives in [`super::identitystore`]; tests
//! substitute fakes or mocks.

use super::error::DirectoryError;
use crate::core::types::{
    CreateIdentity, DirectoryGroupId, DirectoryUserId, IdentityStoreId, MembershipId,
};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Handle to an identity directory. Implementations hold no per-identity
/// state, so one handle is reused for every row of a run.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Create a user; fails with `Conflict` when the user name is taken.
    async fn create_user(
        &self,
        identity_store_id: &IdentityStoreId,
        identity: &CreateIdentity,
    ) -> Result<DirectoryUserId, DirectoryError>;

    async fn delete_user(
        &self,
        identity_store_id: &IdentityStoreId,
        user_id: &DirectoryUserId,
    ) -> Result<(), DirectoryError>;

    /// Look a user up by its `UserName` attribute.
    async fn get_user_id(
        &self,
        identity_store_id: &IdentityStoreId,
        user_name: &str,
    ) -> Result<DirectoryUserId, DirectoryError>;

    /// Look a group up by its unique `displayName` attribute.
    async fn get_group_id(
        &self,
        identity_store_id: &IdentityStoreId,
        display_name: &str,
    ) -> Result<DirectoryGroupId, DirectoryError>;

    async fn create_group_membership(
        &self,
        identity_store_id: &IdentityStoreId,
        group_id: &DirectoryGroupId,
        user_id: &DirectoryUserId,
    ) -> Result<MembershipId, DirectoryError>;
}
