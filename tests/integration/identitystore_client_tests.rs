//! Identity store HTTP client tests
//!
//! The client talks to a local wiremock server standing in for the
//! regional identity store endpoint.

#[cfg(test)]
mod tests {
    use crate::common::CsvFixture;
    use identitystore_bulk::core::types::{DirectoryGroupId, DirectoryUserId, Email};
    use identitystore_bulk::utils::error::RetryConfig;
    use identitystore_bulk::{
        BatchExecutor, Config, CreateIdentity, DirectoryError, DirectoryGateway,
        IdentityStoreClient, IdentityStoreId, OperationKind, OutcomeStatus,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JSON_1_1: &str = "application/x-amz-json-1.1";

    fn store() -> IdentityStoreId {
        IdentityStoreId::new("d-1234567890")
    }

    fn client(server: &MockServer) -> IdentityStoreClient {
        let mut config = Config::default();
        config.aws.access_key_id = "AKIDEXAMPLE".to_string();
        config.aws.secret_access_key = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string();
        config.aws.endpoint = Some(server.uri());
        config.retry = RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
            jitter: false,
        };
        IdentityStoreClient::new(&config).unwrap()
    }

    fn target(operation: &str) -> String {
        format!("AWSIdentityStore.{}", operation)
    }

    #[tokio::test]
    async fn test_create_user_request_is_signed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", JSON_1_1))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .and(header_exists("x-amz-date"))
            .and(header_regex(
                "authorization",
                r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-east-1/identitystore/aws4_request, SignedHeaders=content-type;host;x-amz-date;x-amz-target, Signature=[0-9a-f]{64}$",
            ))
            .and(body_json(json!({
                "IdentityStoreId": "d-1234567890",
                "UserName": "nina_franco",
                "DisplayName": "Nina Franco",
                "Name": {"FamilyName": "Franco", "GivenName": "Nina"},
                "Emails": [{"Value": "nina@example.com", "Type": "work", "Primary": true}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "IdentityStoreId": "d-1234567890",
                "UserId": "9067-example"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let identity = CreateIdentity::new("nina_franco", "Nina", "Franco").with_email(Email {
            value: "nina@example.com".to_string(),
            email_type: Some("work".to_string()),
            primary: true,
        });
        let user_id = client(&server).create_user(&store(), &identity).await.unwrap();
        assert_eq!(user_id, DirectoryUserId::new("9067-example"));
    }

    #[tokio::test]
    async fn test_group_lookup_uses_display_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetGroupId").as_str()))
            .and(body_json(json!({
                "IdentityStoreId": "d-1234567890",
                "AlternateIdentifier": {
                    "UniqueAttribute": {"AttributePath": "displayName", "AttributeValue": "Engineers"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "GroupId": "g-42",
                "IdentityStoreId": "d-1234567890"
            })))
            .mount(&server)
            .await;

        let group_id = client(&server)
            .get_group_id(&store(), "Engineers")
            .await
            .unwrap();
        assert_eq!(group_id, DirectoryGroupId::new("g-42"));
    }

    #[tokio::test]
    async fn test_resource_not_found_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "com.amazonaws.identitystore#ResourceNotFoundException",
                "Message": "USER not found."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .get_user_id(&store(), "ghost")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("USER not found."));
    }

    #[tokio::test]
    async fn test_conflict_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("x-amzn-errortype", "ConflictException:http://internal/")
                    .set_body_json(json!({"message": "Duplicate UserName"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let identity = CreateIdentity::new("dup", "Dup", "User");
        let err = client(&server)
            .create_user(&store(), &identity)
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_throttling_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "ThrottlingException",
                "message": "Rate exceeded"
            })))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserId": "u-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let user_id = client(&server)
            .get_user_id(&store(), "alice")
            .await
            .unwrap();
        assert_eq!(user_id, DirectoryUserId::new("u-1"));
    }

    #[tokio::test]
    async fn test_server_errors_give_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "__type": "InternalServerException",
                "message": "boom"
            })))
            .expect(3)
            .mount(&server)
            .await;

        let err = client(&server)
            .delete_user(&store(), &DirectoryUserId::new("u-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_delete_user_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("DeleteUser").as_str()))
            .and(body_json(json!({"IdentityStoreId": "d-1234567890", "UserId": "u-1"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_user(&store(), &DirectoryUserId::new("u-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_membership_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateGroupMembership").as_str()))
            .and(body_json(json!({
                "IdentityStoreId": "d-1234567890",
                "GroupId": "g-1",
                "MemberId": {"UserId": "u-1"}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"MembershipId": "m-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let membership = client(&server)
            .create_group_membership(
                &store(),
                &DirectoryGroupId::new("g-1"),
                &DirectoryUserId::new("u-1"),
            )
            .await
            .unwrap();
        assert_eq!(membership.as_str(), "m-1");
    }

    /// A create whose response was lost may already have run, so a retry
    /// would report a conflict for a user that exists
    #[tokio::test]
    async fn test_create_user_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "__type": "InternalServerException",
                "message": "boom"
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "ConflictException",
                "message": "Duplicate UserName"
            })))
            .expect(0)
            .mount(&server)
            .await;

        let csv = CsvFixture::create_batch(&["alice,Alice,Smith,,,,"]);
        let executor = BatchExecutor::new(client(&server), store());
        let outcomes = executor
            .run_file(OperationKind::Create, csv.path())
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert_eq!(outcomes[0].user_id, None);
        assert!(outcomes[0].detail.starts_with("create-user failed"));
        assert!(!outcomes[0].detail.contains("Duplicate"));
    }

    #[tokio::test]
    async fn test_membership_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserId": "u-9"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetGroupId").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"GroupId": "g-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateGroupMembership").as_str()))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "__type": "InternalServerException",
                "message": "boom"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let csv = CsvFixture::create_batch(&["bob,Bob,Jones,Engineers,,,"]);
        let executor = BatchExecutor::new(client(&server), store());
        let outcomes = executor
            .run_file(OperationKind::Create, csv.path())
            .await
            .unwrap();

        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert_eq!(outcomes[0].user_id, Some(DirectoryUserId::new("u-9")));
        assert!(
            outcomes[0]
                .detail
                .contains("user created with UserId u-9 but adding to group 'Engineers' failed")
        );
    }

    #[tokio::test]
    async fn test_throttled_create_user_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "ThrottlingException",
                "message": "Rate exceeded"
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserId": "u-3"})))
            .expect(1)
            .mount(&server)
            .await;

        let identity = CreateIdentity::new("carol", "Carol", "White");
        let user_id = client(&server).create_user(&store(), &identity).await.unwrap();
        assert_eq!(user_id, DirectoryUserId::new("u-3"));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_group_id(&store(), "Engineers")
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::ResponseParsing { .. }));
    }

    /// Full pipeline over HTTP: user created, group missing, membership skipped
    #[tokio::test]
    async fn test_batch_over_http_skips_missing_group() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateUser").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserId": "u-7"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("GetGroupId").as_str()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "ResourceNotFoundException",
                "message": "GROUP not found."
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", target("CreateGroupMembership").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let csv = CsvFixture::create_batch(&["bob,Bob,Jones,Engineers,,,"]);
        let executor = BatchExecutor::new(client(&server), store());
        let outcomes = executor
            .run_file(OperationKind::Create, csv.path())
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::GroupSkipped);
        assert_eq!(outcomes[0].user_id, Some(DirectoryUserId::new("u-7")));
        assert!(outcomes[0].detail.contains("Engineers"));
    }
}
