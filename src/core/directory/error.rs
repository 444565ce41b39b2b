//! Directory gateway error handling
//!
//! Single error type for every directory operation.
//!
//! | Variant | Purpose | Retryable |
//! |------|------|--------|
//! | ResourceNotFound | User or group does not exist | No |
//! | Conflict | Duplicate user name or membership | No |
//! | AccessDenied | Caller lacks permission | No |
//! | Authentication | Credentials rejected or signature invalid | No |
//! | Validation | Request rejected by the service | No |
//! | ServiceQuotaExceeded | Identity store quota reached | No |
//! | Throttling | Request rate exceeded | Yes (after delay) |
//! | Internal | Service side failure | Yes |
//! | Api | Unclassified HTTP error | 5xx only |
//! | Network | Connection failure | Yes |
//! | Timeout | Request or row deadline elapsed | Yes |
//! | Serialization | Payload could not be encoded | No |
//! | ResponseParsing | Response could not be decoded | No |
//! | Configuration | Client could not be built | No |
//!
//! `ResourceNotFound` on a group lookup is not a failure for the batch; the
//! resolver turns it into a skip. Everywhere else it fails the row.

use crate::utils::error::recovery::Retryable;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Resource not found: {message}")]
    ResourceNotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Service quota exceeded: {message}")]
    ServiceQuotaExceeded { message: String },

    #[error("Throttled: {message}")]
    Throttling {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Failed to parse response: {message}")]
    ResponseParsing { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DirectoryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::ServiceQuotaExceeded {
            message: message.into(),
        }
    }

    pub fn throttling(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::Throttling {
            message: message.into(),
            retry_after,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn response_parsing(message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Whether repeating the identical request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Throttling { .. }
            | Self::Internal { .. }
            | Self::Network { .. }
            | Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The request was rejected before it ran
    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::Throttling { .. })
    }

    /// Delay requested by the service before retrying
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            Self::Throttling { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl Retryable for DirectoryError {
    fn is_retryable(&self) -> bool {
        DirectoryError::is_retryable(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        self.retry_delay().map(Duration::from_secs)
    }
}
