//! Identity store HTTP client
//!
//! Signs AWS JSON 1.1 requests with SigV4 and maps responses onto the
//! [`DirectoryGateway`] operations.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, error};
use url::Url;

use super::SERVICE_NAME;
use super::auth::AwsCredentials;
use super::error::IdentityStoreErrorMapper;
use super::sigv4::SigV4Signer;
use super::wire::{self, Operation};
use crate::config::Config;
use crate::core::directory::{DirectoryError, DirectoryGateway};
use crate::core::types::{
    CreateIdentity, DirectoryGroupId, DirectoryUserId, IdentityStoreId, MembershipId,
};
use crate::utils::error::RetryPolicy;

/// Identity store client
#[derive(Debug, Clone)]
pub struct IdentityStoreClient {
    http: Client,
    endpoint: Url,
    signer: SigV4Signer,
    retry: RetryPolicy,
    error_mapper: IdentityStoreErrorMapper,
}

impl IdentityStoreClient {
    /// Create a client for the configured region or endpoint
    pub fn new(config: &Config) -> Result<Self, DirectoryError> {
        let credentials = AwsCredentials::from_config(&config.aws);
        credentials.validate()?;

        let endpoint = Url::parse(&config.endpoint()).map_err(|e| {
            DirectoryError::configuration(format!("Invalid endpoint {}: {}", config.endpoint(), e))
        })?;

        let http = Client::builder()
            .timeout(config.client.timeout())
            .build()
            .map_err(|e| {
                DirectoryError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        debug!(
            "Identity store client for {} using {} credentials",
            endpoint,
            credentials.credential_type()
        );

        Ok(Self {
            http,
            endpoint,
            signer: SigV4Signer::new(credentials, config.aws.region.clone(), SERVICE_NAME),
            retry: RetryPolicy::new(config.retry.clone()),
            error_mapper: IdentityStoreErrorMapper,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Serialize, sign and send one operation, retrying transient failures
    async fn invoke<Req, Resp>(&self, operation: Operation, request: &Req) -> Result<Resp, DirectoryError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_string(request)
            .map_err(|e| DirectoryError::serialization(e.to_string()))?;
        debug!("{} request body: {}", operation, body);

        let retry_on: fn(&DirectoryError) -> bool = if operation.is_idempotent() {
            DirectoryError::is_retryable
        } else {
            // only a throttled create is known not to have run
            DirectoryError::is_throttling
        };

        self.retry
            .call_when(|| self.send::<Resp>(operation, &body), retry_on)
            .await
    }

    async fn send<Resp>(&self, operation: Operation, body: &str) -> Result<Resp, DirectoryError>
    where
        Resp: DeserializeOwned,
    {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), wire::CONTENT_TYPE.to_string());
        headers.insert("x-amz-target".to_string(), operation.target());

        let signed = self.signer.sign_request(
            "POST",
            self.endpoint.as_str(),
            &headers,
            body,
            chrono::Utc::now(),
        )?;

        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in signed {
            // reqwest derives Host from the URL
            if key == "host" {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(&value),
            ) {
                header_map.insert(name, value);
            }
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(header_map)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| self.error_mapper.map_network_error(&e))?;

        let status = response.status();
        let retry_after = header_str(&response, "retry-after").and_then(|v| v.parse::<u64>().ok());
        let error_type = header_str(&response, "x-amzn-errortype");

        let text = response
            .text()
            .await
            .map_err(|e| self.error_mapper.map_network_error(&e))?;

        if !status.is_success() {
            error!("{} failed: {} - {}", operation, status.as_u16(), text);
            return Err(self.error_mapper.map_http_error(
                status.as_u16(),
                error_type.as_deref(),
                retry_after,
                &text,
            ));
        }

        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| self.error_mapper.map_parsing_error(&e))
    }
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl DirectoryGateway for IdentityStoreClient {
    async fn create_user(
        &self,
        identity_store_id: &IdentityStoreId,
        identity: &CreateIdentity,
    ) -> Result<DirectoryUserId, DirectoryError> {
        let request = wire::CreateUserRequest::new(identity_store_id, identity);
        let response: wire::CreateUserResponse =
            self.invoke(Operation::CreateUser, &request).await?;
        Ok(DirectoryUserId::new(response.user_id))
    }

    async fn delete_user(
        &self,
        identity_store_id: &IdentityStoreId,
        user_id: &DirectoryUserId,
    ) -> Result<(), DirectoryError> {
        let request = wire::DeleteUserRequest {
            identity_store_id: identity_store_id.as_str(),
            user_id: user_id.as_str(),
        };
        let _: wire::DeleteUserResponse = self.invoke(Operation::DeleteUser, &request).await?;
        Ok(())
    }

    async fn get_user_id(
        &self,
        identity_store_id: &IdentityStoreId,
        user_name: &str,
    ) -> Result<DirectoryUserId, DirectoryError> {
        let request =
            wire::GetIdRequest::unique_attribute(identity_store_id, wire::USER_NAME_PATH, user_name);
        let response: wire::GetUserIdResponse = self.invoke(Operation::GetUserId, &request).await?;
        Ok(DirectoryUserId::new(response.user_id))
    }

    async fn get_group_id(
        &self,
        identity_store_id: &IdentityStoreId,
        display_name: &str,
    ) -> Result<DirectoryGroupId, DirectoryError> {
        let request = wire::GetIdRequest::unique_attribute(
            identity_store_id,
            wire::GROUP_DISPLAY_NAME_PATH,
            display_name,
        );
        let response: wire::GetGroupIdResponse =
            self.invoke(Operation::GetGroupId, &request).await?;
        Ok(DirectoryGroupId::new(response.group_id))
    }

    async fn create_group_membership(
        &self,
        identity_store_id: &IdentityStoreId,
        group_id: &DirectoryGroupId,
        user_id: &DirectoryUserId,
    ) -> Result<MembershipId, DirectoryError> {
        let request = wire::CreateGroupMembershipRequest {
            identity_store_id: identity_store_id.as_str(),
            group_id: group_id.as_str(),
            member_id: wire::MemberId {
                user_id: user_id.as_str(),
            },
        };
        let response: wire::CreateGroupMembershipResponse =
            self.invoke(Operation::CreateGroupMembership, &request).await?;
        Ok(MembershipId::new(response.membership_id))
    }
}
