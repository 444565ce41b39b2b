//! AWS credentials for the identity store client

use crate::config::AwsConfig;
use crate::core::directory::DirectoryError;
use std::fmt;
use tracing::warn;

/// AWS authentication credentials
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    pub fn from_config(config: &AwsConfig) -> Self {
        Self::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.session_token.clone(),
        )
    }

    /// Validate credentials format
    pub fn validate(&self) -> Result<(), DirectoryError> {
        if self.access_key_id.is_empty() {
            return Err(DirectoryError::configuration(
                "AWS access key ID cannot be empty",
            ));
        }

        if self.secret_access_key.is_empty() {
            return Err(DirectoryError::configuration(
                "AWS secret access key cannot be empty",
            ));
        }

        // Local emulators accept arbitrary keys, so an unusual prefix only warns
        if self.credential_type() == "unknown" {
            warn!("AWS access key ID does not look like an AKIA/ASIA key");
        }

        Ok(())
    }

    /// Get credential type for logging/debugging
    pub fn credential_type(&self) -> &'static str {
        if self.access_key_id.starts_with("AKIA") {
            "long-term"
        } else if self.access_key_id.starts_with("ASIA") {
            "temporary"
        } else {
            "unknown"
        }
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
