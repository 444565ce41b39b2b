//! Typed identity operations
//!
//! A CSV row is converted into exactly one of these values before any
//! directory call is made for it. Wire payloads are derived from them only
//! inside the gateway implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identity store every operation of a run is scoped to
    IdentityStoreId
);
opaque_id!(
    /// User identifier assigned by the directory
    DirectoryUserId
);
opaque_id!(
    /// Group identifier assigned by the directory
    DirectoryGroupId
);
opaque_id!(
    /// Membership identifier assigned by the directory
    MembershipId
);

/// Which batch a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single email a user may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub value: String,
    /// e.g. `work`, `personal`; omitted from the payload when blank
    pub email_type: Option<String>,
    pub primary: bool,
}

/// A user to create, optionally with an email and a group to join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIdentity {
    pub username: String,
    given_name: String,
    family_name: String,
    display_name: String,
    pub email: Option<Email>,
    pub group_name: Option<String>,
}

impl CreateIdentity {
    /// Build an identity; the display name is always `"{given} {family}"`.
    pub fn new(
        username: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        let given_name = given_name.into();
        let family_name = family_name.into();
        let display_name = format!("{} {}", given_name, family_name);
        Self {
            username: username.into(),
            given_name,
            family_name,
            display_name,
            email: None,
            group_name: None,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Always agrees with the name parts; they can only be set through [`Self::new`].
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// A user to remove, addressed by user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIdentity {
    pub username: String,
}

impl DeleteIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A validated row, ready for the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityOperation {
    Create(CreateIdentity),
    Delete(DeleteIdentity),
}

impl IdentityOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            IdentityOperation::Create(_) => OperationKind::Create,
            IdentityOperation::Delete(_) => OperationKind::Delete,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            IdentityOperation::Create(identity) => &identity.username,
            IdentityOperation::Delete(identity) => &identity.username,
        }
    }
}
