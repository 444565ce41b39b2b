//! Batch executor settings

use super::default_concurrency;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Rows processed at once; 1 means strictly sequential
    pub concurrency: usize,
    /// Deadline shared by all directory calls of one row
    pub row_timeout_seconds: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            row_timeout_seconds: None,
        }
    }
}

impl ExecutorConfig {
    pub fn row_timeout(&self) -> Option<Duration> {
        self.row_timeout_seconds.map(Duration::from_secs)
    }
}
