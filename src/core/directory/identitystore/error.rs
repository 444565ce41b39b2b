//! Identity store error mapping
//!
//! Maps AWS JSON protocol errors onto [`DirectoryError`].

use super::wire::ErrorResponse;
use crate::core::directory::DirectoryError;
use tracing::debug;

/// Error mapper for identity store responses
#[derive(Debug, Clone, Default)]
pub struct IdentityStoreErrorMapper;

impl IdentityStoreErrorMapper {
    /// Map a non-success response.
    ///
    /// `error_type_header` is the `x-amzn-errortype` header and `retry_after`
    /// the `Retry-After` header in seconds, when present.
    pub fn map_http_error(
        &self,
        status_code: u16,
        error_type_header: Option<&str>,
        retry_after: Option<u64>,
        response_body: &str,
    ) -> DirectoryError {
        let body: ErrorResponse = serde_json::from_str(response_body).unwrap_or_default();
        let error_type = body
            .error_type
            .as_deref()
            .or(error_type_header)
            .map(short_error_type);
        let message = body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}: {}", status_code, response_body));

        debug!(
            "Identity store error: status={} type={:?} message={}",
            status_code, error_type, message
        );

        match error_type {
            Some(error_type) => self.map_error_type(status_code, error_type, message, retry_after),
            None => self.map_status(status_code, message, retry_after),
        }
    }

    fn map_error_type(
        &self,
        status_code: u16,
        error_type: &str,
        message: String,
        retry_after: Option<u64>,
    ) -> DirectoryError {
        match error_type {
            "ResourceNotFoundException" => DirectoryError::not_found(message),
            "ConflictException" => DirectoryError::conflict(message),
            "AccessDeniedException" => DirectoryError::access_denied(message),
            "ValidationException" => DirectoryError::validation(message),
            "ServiceQuotaExceededException" => DirectoryError::quota_exceeded(message),
            "ThrottlingException" => DirectoryError::throttling(message, retry_after),
            "InternalServerException" => DirectoryError::internal(message),
            "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "IncompleteSignature"
            | "MissingAuthenticationToken"
            | "ExpiredTokenException" => DirectoryError::authentication(message),
            _ => self.map_status(status_code, format!("{}: {}", error_type, message), retry_after),
        }
    }

    fn map_status(
        &self,
        status_code: u16,
        message: String,
        retry_after: Option<u64>,
    ) -> DirectoryError {
        match status_code {
            400 => DirectoryError::validation(message),
            401 => DirectoryError::authentication(message),
            403 => DirectoryError::access_denied(message),
            404 => DirectoryError::not_found(message),
            409 => DirectoryError::conflict(message),
            429 => DirectoryError::throttling(message, retry_after),
            500 => DirectoryError::internal(message),
            _ => DirectoryError::api_error(status_code, message),
        }
    }

    pub fn map_network_error(&self, error: &reqwest::Error) -> DirectoryError {
        if error.is_timeout() {
            DirectoryError::timeout(format!("Request timed out: {}", error))
        } else {
            DirectoryError::network(format!("Network error: {}", error))
        }
    }

    pub fn map_parsing_error(&self, error: &dyn std::error::Error) -> DirectoryError {
        DirectoryError::response_parsing(format!("Parsing error: {}", error))
    }
}

/// `com.amazonaws.identitystore#ConflictException` or
/// `ConflictException:http://internal.amazon.com/...` to `ConflictException`
fn short_error_type(raw: &str) -> &str {
    let raw = raw.rsplit('#').next().unwrap_or(raw);
    raw.split(':').next().unwrap_or(raw)
}
