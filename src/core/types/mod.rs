//! Domain types shared by the batch pipeline

pub mod identity;
pub mod outcome;

pub use identity::{
    CreateIdentity, DeleteIdentity, DirectoryGroupId, DirectoryUserId, Email, IdentityOperation,
    IdentityStoreId, MembershipId, OperationKind,
};
pub use outcome::{OutcomeStatus, RowOutcome};
