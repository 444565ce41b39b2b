//! Configuration validation

use crate::config::models::*;
use crate::utils::error::RetryConfig;
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for AwsConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating AWS configuration");

        if self.region.is_empty() {
            return Err("region cannot be empty".to_string());
        }
        if !is_region_name(&self.region) {
            return Err(format!("invalid region name: {}", self.region));
        }
        if self.access_key_id.trim().is_empty() {
            return Err("AWS_ACCESS_KEY_ID is not set".to_string());
        }
        if self.secret_access_key.trim().is_empty() {
            return Err("AWS_SECRET_ACCESS_KEY is not set".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            let url = url::Url::parse(endpoint)
                .map_err(|e| format!("invalid endpoint '{}': {}", endpoint, e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(format!(
                    "endpoint must use http or https, got '{}'",
                    url.scheme()
                ));
            }
            if url.host_str().is_none() {
                return Err(format!("endpoint '{}' has no host", endpoint));
            }
        }

        Ok(())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ExecutorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }
        if self.row_timeout_seconds == Some(0) {
            return Err("row_timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("backoff_multiplier must be >= 1.0".to_string());
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err("base_delay_ms cannot exceed max_delay_ms".to_string());
        }
        Ok(())
    }
}

/// Region names look like `us-east-1` or `ap-southeast-2`
fn is_region_name(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();
    parts.len() >= 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
        && parts
            .last()
            .is_some_and(|p| p.chars().all(|c| c.is_ascii_digit()))
}
