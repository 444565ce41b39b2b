//! Configuration layering tests
//!
//! File, environment and command-line values applied in precedence order.

#[cfg(test)]
mod tests {
    use clap::Parser;
    use identitystore_bulk::cli::Cli;
    use identitystore_bulk::{BulkError, Config};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_file_then_env_then_flags() {
        let file = yaml(
            r#"
aws:
  region: "eu-west-1"
  endpoint: "http://localhost:4566"
executor:
  concurrency: 2
"#,
        );
        let mut config = Config::from_file(file.path()).await.unwrap();

        config
            .apply_env_with(env(&[
                ("AWS_REGION", "eu-central-1"),
                ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
                ("AWS_SECRET_ACCESS_KEY", "secret"),
            ]))
            .unwrap();
        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.executor.concurrency, 2);

        let cli = Cli::try_parse_from([
            "identitystore-bulk",
            "delete-users",
            "--identitystoreid",
            "d-1234567890",
            "--identities-file",
            "users.csv",
            "--concurrency",
            "6",
        ])
        .unwrap();
        cli.apply_overrides(&mut config);

        assert_eq!(config.executor.concurrency, 6);
        assert_eq!(config.aws.endpoint.as_deref(), Some("http://localhost:4566"));
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_config_error() {
        let file = yaml("aws: 42");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, BulkError::Config(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let base = || {
            let mut config = Config::default();
            config
                .apply_env_with(env(&[
                    ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
                    ("AWS_SECRET_ACCESS_KEY", "secret"),
                ]))
                .unwrap();
            config
        };

        assert!(base().validate().is_ok());

        let mut config = base();
        config.aws.region = "moon".to_string();
        assert!(config.validate().is_err());

        let mut config = base();
        config.client.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = base();
        config.executor.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = base();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = base();
        config.aws.endpoint = Some("file:///etc/passwd".to_string());
        assert!(config.validate().is_err());
    }
}
