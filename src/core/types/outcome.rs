//! Per-row results

use super::identity::{DirectoryUserId, OperationKind};
use serde::Serialize;
use std::fmt;

/// Final state of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Created,
    Deleted,
    /// User created, group missing so no membership was attempted
    GroupSkipped,
    Failed,
}

impl OutcomeStatus {
    /// Stable tag for grepping report output
    pub fn tag(&self) -> &'static str {
        match self {
            OutcomeStatus::Created => "CREATED",
            OutcomeStatus::Deleted => "DELETED",
            OutcomeStatus::GroupSkipped => "GROUP_SKIPPED",
            OutcomeStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result record for one CSV data row, independent of every other row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// Zero-based position of the row in the batch file
    #[serde(skip)]
    pub row_index: usize,
    pub operation: OperationKind,
    pub username: Option<String>,
    pub status: OutcomeStatus,
    /// Set whenever the directory handed back a user id, including partial failures
    pub user_id: Option<DirectoryUserId>,
    pub detail: String,
}

impl RowOutcome {
    fn new(
        row_index: usize,
        operation: OperationKind,
        username: Option<String>,
        status: OutcomeStatus,
        user_id: Option<DirectoryUserId>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            operation,
            username,
            status,
            user_id,
            detail: detail.into(),
        }
    }

    pub fn created(
        row_index: usize,
        username: impl Into<String>,
        user_id: DirectoryUserId,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            row_index,
            OperationKind::Create,
            Some(username.into()),
            OutcomeStatus::Created,
            Some(user_id),
            detail,
        )
    }

    pub fn group_skipped(
        row_index: usize,
        username: impl Into<String>,
        user_id: DirectoryUserId,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            row_index,
            OperationKind::Create,
            Some(username.into()),
            OutcomeStatus::GroupSkipped,
            Some(user_id),
            detail,
        )
    }

    pub fn deleted(
        row_index: usize,
        username: impl Into<String>,
        user_id: DirectoryUserId,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            row_index,
            OperationKind::Delete,
            Some(username.into()),
            OutcomeStatus::Deleted,
            Some(user_id),
            detail,
        )
    }

    pub fn failed(
        row_index: usize,
        operation: OperationKind,
        username: Option<String>,
        user_id: Option<DirectoryUserId>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            row_index,
            operation,
            username,
            OutcomeStatus::Failed,
            user_id,
            detail,
        )
    }

    /// One-based row number as an operator counts data rows
    pub fn row_number(&self) -> usize {
        self.row_index + 1
    }

    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}
