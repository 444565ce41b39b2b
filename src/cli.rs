//! Command-line interface

use crate::config::Config;
use crate::core::report::OutputFormat;
use crate::core::types::{IdentityStoreId, OperationKind};
use crate::utils::error::Result;
use crate::utils::logging::LogFormat;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Version string with the git revision of the build
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Bulk create or delete IAM Identity Center users from a CSV file
#[derive(Debug, Parser)]
#[command(name = "identitystore-bulk", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// AWS region of the identity store
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Identity store endpoint override
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Rows processed at once
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Deadline in seconds for all directory calls of one row
    #[arg(long, global = true, value_name = "SECS")]
    pub row_timeout: Option<u64>,

    /// Format of the per-row outcome lines on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create users and add them to their groups
    #[command(name = "create-users", alias = "create_users")]
    CreateUsers(BatchArgs),
    /// Delete users by user name
    #[command(name = "delete-users", alias = "delete_users")]
    DeleteUsers(BatchArgs),
}

impl Command {
    pub fn kind(&self) -> OperationKind {
        match self {
            Command::CreateUsers(_) => OperationKind::Create,
            Command::DeleteUsers(_) => OperationKind::Delete,
        }
    }

    pub fn args(&self) -> &BatchArgs {
        match self {
            Command::CreateUsers(args) | Command::DeleteUsers(args) => args,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Identity store every row is applied to, e.g. d-1234567890
    #[arg(
        long = "identitystoreid",
        alias = "identity-store-id",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub identity_store_id: String,

    /// CSV file with one identity per row
    #[arg(long = "identities-file", alias = "identities_file", value_name = "PATH")]
    pub identities_file: PathBuf,
}

impl BatchArgs {
    pub fn identity_store_id(&self) -> IdentityStoreId {
        IdentityStoreId::new(self.identity_store_id.trim())
    }
}

impl Cli {
    /// Flags take precedence over every other configuration source
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(region) = &self.region {
            config.aws.region = region.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.aws.endpoint = Some(endpoint.clone());
        }
        if let Some(concurrency) = self.concurrency {
            config.executor.concurrency = concurrency;
        }
        if let Some(row_timeout) = self.row_timeout {
            config.executor.row_timeout_seconds = Some(row_timeout);
        }
    }

    /// Defaults, then the config file, then the environment, then flags
    pub async fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::default(),
        };
        config.apply_env()?;
        self.apply_overrides(&mut config);
        config.validate()?;

        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}
