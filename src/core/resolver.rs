//! Group lookup by display name

use crate::core::directory::{DirectoryError, DirectoryGateway};
use crate::core::types::{DirectoryGroupId, IdentityStoreId};
use tracing::debug;

/// Result of a group lookup that reached the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResolution {
    Found(DirectoryGroupId),
    /// No group carries that display name; membership is skipped
    NotFound,
}

/// Resolves group display names through a [`DirectoryGateway`].
///
/// Only `ResourceNotFound` becomes [`GroupResolution::NotFound`]; every other
/// gateway failure is handed back to the caller unchanged.
pub struct GroupResolver<'a, G: ?Sized> {
    gateway: &'a G,
}

impl<'a, G> GroupResolver<'a, G>
where
    G: DirectoryGateway + ?Sized,
{
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn resolve(
        &self,
        identity_store_id: &IdentityStoreId,
        display_name: &str,
    ) -> Result<GroupResolution, DirectoryError> {
        match self
            .gateway
            .get_group_id(identity_store_id, display_name)
            .await
        {
            Ok(group_id) => {
                debug!("Group '{}' resolved to {}", display_name, group_id);
                Ok(GroupResolution::Found(group_id))
            }
            Err(e) if e.is_not_found() => {
                debug!("Group '{}' not found: {}", display_name, e);
                Ok(GroupResolution::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}
