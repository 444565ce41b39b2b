//! Batch executor
//!
//! Drives every row of a batch through validation and the directory calls
//! of its operation, producing exactly one [`RowOutcome`] per row in file
//! order. A failing row never stops the rows after it.

use crate::config::ExecutorConfig;
use crate::core::batch::{BatchLoader, BatchReadError, RawRow, columns, map_row};
use crate::core::directory::{DirectoryError, DirectoryGateway};
use crate::core::resolver::{GroupResolution, GroupResolver};
use crate::core::types::{
    CreateIdentity, DeleteIdentity, IdentityOperation, IdentityStoreId, OperationKind, RowOutcome,
};
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Execution knobs for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Rows in flight at once. Calls within a row always stay serial.
    pub concurrency: usize,
    /// Deadline shared by every directory call of a row
    pub row_timeout: Option<Duration>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            row_timeout: None,
        }
    }
}

impl From<&ExecutorConfig> for ExecutorOptions {
    fn from(config: &ExecutorConfig) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            row_timeout: config.row_timeout(),
        }
    }
}

/// Runs create or delete batches against one identity store
pub struct BatchExecutor<G> {
    gateway: G,
    identity_store_id: IdentityStoreId,
    options: ExecutorOptions,
}

impl<G> BatchExecutor<G>
where
    G: DirectoryGateway,
{
    pub fn new(gateway: G, identity_store_id: IdentityStoreId) -> Self {
        Self {
            gateway,
            identity_store_id,
            options: ExecutorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    /// Outcomes as rows finish, always yielded in file order
    pub fn stream<'a>(
        &'a self,
        kind: OperationKind,
        rows: &'a [RawRow],
    ) -> impl Stream<Item = RowOutcome> + 'a {
        stream::iter(rows)
            .map(move |row| self.process_row(kind, row))
            .buffered(self.options.concurrency.max(1))
    }

    /// Process every row and collect the outcomes
    pub async fn run(&self, kind: OperationKind, rows: &[RawRow]) -> Vec<RowOutcome> {
        self.stream(kind, rows).collect().await
    }

    /// Load a batch file and process it. Only a load failure is an error.
    pub async fn run_file(
        &self,
        kind: OperationKind,
        path: impl AsRef<Path>,
    ) -> Result<Vec<RowOutcome>, BatchReadError> {
        let batch = BatchLoader::default().load(path)?;
        Ok(self.run(kind, batch.rows()).await)
    }

    /// Validate and execute one row
    pub async fn process_row(&self, kind: OperationKind, row: &RawRow) -> RowOutcome {
        let deadline = self.options.row_timeout.map(|t| Instant::now() + t);

        let outcome = match map_row(row, kind) {
            Ok(IdentityOperation::Create(identity)) => {
                self.create(row.index(), &identity, deadline).await
            }
            Ok(IdentityOperation::Delete(identity)) => {
                self.delete(row.index(), &identity, deadline).await
            }
            Err(e) => RowOutcome::failed(
                row.index(),
                kind,
                row.non_blank(columns::USERNAME).map(str::to_string),
                None,
                format!("validation failed: {}", e.reason),
            ),
        };

        log_outcome(&outcome);
        outcome
    }

    async fn create(
        &self,
        row_index: usize,
        identity: &CreateIdentity,
        deadline: Option<Instant>,
    ) -> RowOutcome {
        let store = &self.identity_store_id;
        let username = identity.username.as_str();

        let user_id = match self
            .within(deadline, self.gateway.create_user(store, identity))
            .await
        {
            Ok(user_id) => user_id,
            Err(e) => {
                return RowOutcome::failed(
                    row_index,
                    OperationKind::Create,
                    Some(username.to_string()),
                    None,
                    format!("create-user failed: {}", e),
                );
            }
        };

        let Some(group_name) = identity.group_name.as_deref() else {
            return RowOutcome::created(
                row_index,
                username,
                user_id.clone(),
                format!("user created with UserId {}", user_id),
            );
        };

        let resolver = GroupResolver::new(&self.gateway);
        let group_id = match self
            .within(deadline, resolver.resolve(store, group_name))
            .await
        {
            Ok(GroupResolution::Found(group_id)) => group_id,
            Ok(GroupResolution::NotFound) => {
                return RowOutcome::group_skipped(
                    row_index,
                    username,
                    user_id.clone(),
                    format!(
                        "user created with UserId {}; group '{}' does not exist, membership skipped",
                        user_id, group_name
                    ),
                );
            }
            Err(e) => {
                return RowOutcome::failed(
                    row_index,
                    OperationKind::Create,
                    Some(username.to_string()),
                    Some(user_id.clone()),
                    format!(
                        "user created with UserId {} but looking up group '{}' failed: {}",
                        user_id, group_name, e
                    ),
                );
            }
        };

        match self
            .within(
                deadline,
                self.gateway
                    .create_group_membership(store, &group_id, &user_id),
            )
            .await
        {
            Ok(membership_id) => RowOutcome::created(
                row_index,
                username,
                user_id.clone(),
                format!(
                    "user created with UserId {} and added to group '{}' (MembershipId {})",
                    user_id, group_name, membership_id
                ),
            ),
            Err(e) => RowOutcome::failed(
                row_index,
                OperationKind::Create,
                Some(username.to_string()),
                Some(user_id.clone()),
                format!(
                    "user created with UserId {} but adding to group '{}' failed: {}",
                    user_id, group_name, e
                ),
            ),
        }
    }

    async fn delete(
        &self,
        row_index: usize,
        identity: &DeleteIdentity,
        deadline: Option<Instant>,
    ) -> RowOutcome {
        let store = &self.identity_store_id;
        let username = identity.username.as_str();

        let user_id = match self
            .within(deadline, self.gateway.get_user_id(store, username))
            .await
        {
            Ok(user_id) => user_id,
            Err(e) => {
                return RowOutcome::failed(
                    row_index,
                    OperationKind::Delete,
                    Some(username.to_string()),
                    None,
                    format!("user lookup failed: {}", e),
                );
            }
        };

        match self
            .within(deadline, self.gateway.delete_user(store, &user_id))
            .await
        {
            Ok(()) => RowOutcome::deleted(
                row_index,
                username,
                user_id.clone(),
                format!("user with UserId {} deleted", user_id),
            ),
            Err(e) => RowOutcome::failed(
                row_index,
                OperationKind::Delete,
                Some(username.to_string()),
                Some(user_id.clone()),
                format!("delete-user for UserId {} failed: {}", user_id, e),
            ),
        }
    }

    /// Await a directory call, bounded by the row deadline when one is set
    async fn within<T, F>(&self, deadline: Option<Instant>, call: F) -> Result<T, DirectoryError>
    where
        F: Future<Output = Result<T, DirectoryError>>,
    {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .unwrap_or_else(|_| {
                    Err(DirectoryError::timeout(format!(
                        "row deadline of {:?} exceeded",
                        self.options.row_timeout.unwrap_or_default()
                    )))
                }),
            None => call.await,
        }
    }
}

fn log_outcome(outcome: &RowOutcome) {
    let username = outcome.username.as_deref().unwrap_or("-");
    if outcome.is_failure() {
        error!(
            "row {} {} {}: {}",
            outcome.row_number(),
            outcome.operation,
            username,
            outcome.detail
        );
    } else if outcome.status == crate::core::types::OutcomeStatus::GroupSkipped {
        warn!(
            "row {} {} {}: {}",
            outcome.row_number(),
            outcome.operation,
            username,
            outcome.detail
        );
    } else {
        info!(
            "row {} {} {}: {}",
            outcome.row_number(),
            outcome.operation,
            username,
            outcome.detail
        );
    }
}
