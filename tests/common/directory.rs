//! In-memory identity directory
//!
//! Behaves like the identity store for the five gateway operations and
//! records every call so tests can count them.

use async_trait::async_trait;
use identitystore_bulk::core::types::{DirectoryGroupId, DirectoryUserId, MembershipId};
use identitystore_bulk::{CreateIdentity, DirectoryError, DirectoryGateway, IdentityStoreId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Gateway operation names, as they appear in recorded calls
pub mod ops {
    pub const CREATE_USER: &str = "CreateUser";
    pub const DELETE_USER: &str = "DeleteUser";
    pub const GET_USER_ID: &str = "GetUserId";
    pub const GET_GROUP_ID: &str = "GetGroupId";
    pub const CREATE_GROUP_MEMBERSHIP: &str = "CreateGroupMembership";
}

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub identity_store_id: String,
    pub argument: String,
}

#[derive(Default)]
struct State {
    users: HashMap<String, DirectoryUserId>,
    groups: HashMap<String, DirectoryGroupId>,
    memberships: Vec<(DirectoryGroupId, DirectoryUserId)>,
    created: Vec<CreateIdentity>,
    calls: Vec<Call>,
    failures: HashMap<(&'static str, String), DirectoryError>,
    next_id: usize,
}

/// Cloneable handle; clones share the same directory
#[derive(Clone, Default)]
pub struct FakeDirectory {
    state: Arc<Mutex<State>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, display_name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = DirectoryGroupId::new(format!("g-{}", display_name.to_lowercase()));
            state.groups.insert(display_name.to_string(), id);
        }
        self
    }

    pub fn with_user(self, username: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = DirectoryUserId::new(format!("u-{:04}", state.next_id));
            state.users.insert(username.to_string(), id);
        }
        self
    }

    /// Make `operation` fail whenever it is called with `argument`
    pub fn fail_on(self, operation: &'static str, argument: &str, error: DirectoryError) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((operation, argument.to_string()), error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    pub fn created_identities(&self) -> Vec<CreateIdentity> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.state.lock().unwrap().users.contains_key(username)
    }

    pub fn user_id(&self, username: &str) -> Option<DirectoryUserId> {
        self.state.lock().unwrap().users.get(username).cloned()
    }

    pub fn memberships(&self) -> Vec<(DirectoryGroupId, DirectoryUserId)> {
        self.state.lock().unwrap().memberships.clone()
    }

    /// Record the call and return the injected failure, if any
    fn enter(
        &self,
        operation: &'static str,
        identity_store_id: &IdentityStoreId,
        argument: &str,
    ) -> Result<(), DirectoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            operation,
            identity_store_id: identity_store_id.to_string(),
            argument: argument.to_string(),
        });
        match state.failures.get(&(operation, argument.to_string())) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryGateway for FakeDirectory {
    async fn create_user(
        &self,
        identity_store_id: &IdentityStoreId,
        identity: &CreateIdentity,
    ) -> Result<DirectoryUserId, DirectoryError> {
        self.enter(ops::CREATE_USER, identity_store_id, &identity.username)?;

        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(&identity.username) {
            return Err(DirectoryError::conflict(format!(
                "Duplicate UserName: {}",
                identity.username
            )));
        }
        state.next_id += 1;
        let id = DirectoryUserId::new(format!("u-{:04}", state.next_id));
        state.users.insert(identity.username.clone(), id.clone());
        state.created.push(identity.clone());
        Ok(id)
    }

    async fn delete_user(
        &self,
        identity_store_id: &IdentityStoreId,
        user_id: &DirectoryUserId,
    ) -> Result<(), DirectoryError> {
        self.enter(ops::DELETE_USER, identity_store_id, user_id.as_str())?;

        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|_, id| id != user_id);
        if state.users.len() == before {
            return Err(DirectoryError::not_found(format!("User {} not found", user_id)));
        }
        Ok(())
    }

    async fn get_user_id(
        &self,
        identity_store_id: &IdentityStoreId,
        user_name: &str,
    ) -> Result<DirectoryUserId, DirectoryError> {
        self.enter(ops::GET_USER_ID, identity_store_id, user_name)?;

        self.user_id(user_name)
            .ok_or_else(|| DirectoryError::not_found(format!("User {} not found", user_name)))
    }

    async fn get_group_id(
        &self,
        identity_store_id: &IdentityStoreId,
        display_name: &str,
    ) -> Result<DirectoryGroupId, DirectoryError> {
        self.enter(ops::GET_GROUP_ID, identity_store_id, display_name)?;

        self.state
            .lock()
            .unwrap()
            .groups
            .get(display_name)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(format!("Group {} not found", display_name)))
    }

    async fn create_group_membership(
        &self,
        identity_store_id: &IdentityStoreId,
        group_id: &DirectoryGroupId,
        user_id: &DirectoryUserId,
    ) -> Result<MembershipId, DirectoryError> {
        self.enter(ops::CREATE_GROUP_MEMBERSHIP, identity_store_id, group_id.as_str())?;

        let mut state = self.state.lock().unwrap();
        state.memberships.push((group_id.clone(), user_id.clone()));
        Ok(MembershipId::new(format!("m-{}", state.memberships.len())))
    }
}
