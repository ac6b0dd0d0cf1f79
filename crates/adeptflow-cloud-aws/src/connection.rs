//! Static-credential connection settings

use crate::error::{AwsError, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::config::Credentials;

/// Name reported by the static credentials provider
const PROVIDER_NAME: &str = "adeptflow-static";

/// Region, access key and secret used to build SDK clients
#[derive(Clone)]
pub struct AwsConnection {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl AwsConnection {
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Reject connections with blank fields before any network call
    pub fn validate(&self) -> Result<()> {
        let blank: Vec<&str> = [
            ("region", &self.region),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(AwsError::InvalidConfig(format!(
                "missing fields: {}",
                blank.join(", ")
            )))
        }
    }

    /// Build a shared SDK config from these credentials
    pub async fn sdk_config(&self) -> Result<SdkConfig> {
        self.validate()?;

        let credentials = Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
            None,
            PROVIDER_NAME,
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Ok(config)
    }
}

impl std::fmt::Debug for AwsConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConnection")
            .field("region", &self.region)
            .field("access_key_id", &mask(&self.access_key_id))
            .field("secret_access_key", &"********")
            .finish()
    }
}

/// Keep the last four characters of an identifier
fn mask(value: &str) -> String {
    let tail: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_blank_fields() {
        let conn = AwsConnection::new("us-east-1", "", " ");
        let err = conn.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("access_key_id"));
        assert!(msg.contains("secret_access_key"));
        assert!(!msg.contains("region"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let conn = AwsConnection::new("eu-west-1", "AKIAEXAMPLE1234", "topsecret");
        let debug = format!("{:?}", conn);
        assert!(debug.contains("eu-west-1"));
        assert!(debug.contains("****1234"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("AKIAEXAMPLE"));
    }

    #[tokio::test]
    async fn test_sdk_config_uses_region() {
        let conn = AwsConnection::new("ap-northeast-1", "AKIATEST", "secret");
        let config = conn.sdk_config().await.unwrap();
        assert_eq!(
            config.region().map(|r| r.as_ref().to_string()),
            Some("ap-northeast-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_sdk_config_rejects_blank() {
        let conn = AwsConnection::new("", "AKIATEST", "secret");
        assert!(conn.sdk_config().await.is_err());
    }
}
