//! Configuration management for the bulk operator
//!
//! Settings are layered: built-in defaults, an optional YAML file, the
//! process environment, and finally command-line flags.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{BulkError, Result, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub aws: AwsConfig,
    pub client: ClientConfig,
    pub retry: RetryConfig,
    pub executor: ExecutorConfig,
}

impl Config {
    /// Load configuration from a YAML file. Missing sections keep their defaults.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BulkError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BulkError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = get("AWS_REGION").or_else(|| get("AWS_DEFAULT_REGION")) {
            self.aws.region = region;
        }
        if let Some(key_id) = get("AWS_ACCESS_KEY_ID") {
            self.aws.access_key_id = key_id;
        }
        if let Some(secret) = get("AWS_SECRET_ACCESS_KEY") {
            self.aws.secret_access_key = secret;
        }
        if let Some(token) = get("AWS_SESSION_TOKEN") {
            self.aws.session_token = Some(token);
        }
        if let Some(endpoint) = get("IDENTITYSTORE_ENDPOINT") {
            self.aws.endpoint = Some(endpoint);
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.aws
            .validate()
            .map_err(|e| BulkError::Config(format!("AWS config error: {}", e)))?;
        self.client
            .validate()
            .map_err(|e| BulkError::Config(format!("Client config error: {}", e)))?;
        self.retry
            .validate()
            .map_err(|e| BulkError::Config(format!("Retry config error: {}", e)))?;
        self.executor
            .validate()
            .map_err(|e| BulkError::Config(format!("Executor config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Identity store endpoint, the regional default unless overridden
    pub fn endpoint(&self) -> String {
        self.aws.resolved_endpoint()
    }
}
