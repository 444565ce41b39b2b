//! AWS JSON 1.1 payloads for the identity store API
//!
//! These types exist only at the HTTP boundary; the rest of the crate works
//! with the typed values in [`crate::core::types`].

use crate::core::types::{CreateIdentity, IdentityStoreId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "AWSIdentityStore";

/// Attribute paths used for unique-attribute lookups
pub const GROUP_DISPLAY_NAME_PATH: &str = "displayName";
pub const USER_NAME_PATH: &str = "UserName";

/// Identity store API operations used by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateUser,
    DeleteUser,
    GetUserId,
    GetGroupId,
    CreateGroupMembership,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateUser => "CreateUser",
            Operation::DeleteUser => "DeleteUser",
            Operation::GetUserId => "GetUserId",
            Operation::GetGroupId => "GetGroupId",
            Operation::CreateGroupMembership => "CreateGroupMembership",
        }
    }

    /// Whether repeating a request that may already have run leaves the
    /// directory unchanged. Creates are not: a lost response followed by a
    /// retry turns a success into a conflict.
    pub fn is_idempotent(&self) -> bool {
        !matches!(
            self,
            Operation::CreateUser | Operation::CreateGroupMembership
        )
    }

    /// Value of the `X-Amz-Target` header
    pub fn target(&self) -> String {
        format!("{}.{}", TARGET_PREFIX, self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest<'a> {
    pub identity_store_id: &'a str,
    pub user_name: &'a str,
    pub display_name: &'a str,
    pub name: Name<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Name<'a> {
    pub family_name: &'a str,
    pub given_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailEntry<'a> {
    pub value: &'a str,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<&'a str>,
    pub primary: bool,
}

impl<'a> CreateUserRequest<'a> {
    pub fn new(identity_store_id: &'a IdentityStoreId, identity: &'a CreateIdentity) -> Self {
        Self {
            identity_store_id: identity_store_id.as_str(),
            user_name: &identity.username,
            display_name: identity.display_name(),
            name: Name {
                family_name: identity.family_name(),
                given_name: identity.given_name(),
            },
            emails: identity
                .email
                .iter()
                .map(|email| EmailEntry {
                    value: &email.value,
                    email_type: email.email_type.as_deref(),
                    primary: email.primary,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserResponse {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteUserRequest<'a> {
    pub identity_store_id: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserResponse {}

/// Request body shared by `GetUserId` and `GetGroupId`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdRequest<'a> {
    pub identity_store_id: &'a str,
    pub alternate_identifier: AlternateIdentifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlternateIdentifier<'a> {
    pub unique_attribute: UniqueAttribute<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UniqueAttribute<'a> {
    pub attribute_path: &'a str,
    pub attribute_value: &'a str,
}

impl<'a> GetIdRequest<'a> {
    pub fn unique_attribute(
        identity_store_id: &'a IdentityStoreId,
        attribute_path: &'a str,
        attribute_value: &'a str,
    ) -> Self {
        Self {
            identity_store_id: identity_store_id.as_str(),
            alternate_identifier: AlternateIdentifier {
                unique_attribute: UniqueAttribute {
                    attribute_path,
                    attribute_value,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetUserIdResponse {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetGroupIdResponse {
    pub group_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGroupMembershipRequest<'a> {
    pub identity_store_id: &'a str,
    pub group_id: &'a str,
    pub member_id: MemberId<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberId<'a> {
    pub user_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGroupMembershipResponse {
    pub membership_id: String,
}

/// AWS JSON protocol error body
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}
