//! Cloud provider trait definition

use crate::error::Result;
use crate::requirement::{InfrastructureRequirement, ResourceKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cloud provider abstraction trait
///
/// The readiness logic only needs a handful of capabilities from the cloud:
/// a lightweight credential check, existence checks for buckets and tables,
/// secret retrieval and function invocation. Implementations translate
/// "resource does not exist" into `Ok(false)` and reserve `Err` for calls
/// that could not be answered at all.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Check if the provider is properly configured and authenticated
    async fn check_auth(&self) -> Result<AuthStatus>;

    /// Check whether the named object-storage bucket exists
    async fn bucket_exists(&self, name: &str) -> Result<bool>;

    /// Check whether the named key-value table exists
    async fn table_exists(&self, name: &str) -> Result<bool>;

    /// Retrieve a secret string by name
    async fn get_secret(&self, name: &str) -> Result<String>;

    /// Invoke a function with a JSON payload and return its JSON response
    async fn invoke_function(
        &self,
        name: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// Existence check dispatched on the requirement kind
    async fn resource_exists(&self, requirement: &InfrastructureRequirement) -> Result<bool> {
        match requirement.kind {
            ResourceKind::Bucket => self.bucket_exists(&requirement.name).await,
            ResourceKind::Table => self.table_exists(&requirement.name).await,
        }
    }
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account/user information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CloudProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        fn display_name(&self) -> &str {
            "Recording"
        }

        async fn check_auth(&self) -> Result<AuthStatus> {
            Ok(AuthStatus::ok("123456789012"))
        }

        async fn bucket_exists(&self, name: &str) -> Result<bool> {
            self.calls.lock().unwrap().push(format!("bucket:{name}"));
            Ok(true)
        }

        async fn table_exists(&self, name: &str) -> Result<bool> {
            self.calls.lock().unwrap().push(format!("table:{name}"));
            Ok(false)
        }

        async fn get_secret(&self, name: &str) -> Result<String> {
            Err(CloudError::ResourceNotFound(name.to_string()))
        }

        async fn invoke_function(
            &self,
            _name: &str,
            payload: serde_json::Value,
        ) -> Result<serde_json::Value> {
            Ok(payload)
        }
    }

    #[tokio::test]
    async fn test_resource_exists_dispatches_on_kind() {
        let provider = RecordingProvider::default();

        let bucket = InfrastructureRequirement::bucket("data");
        let table = InfrastructureRequirement::table("tasks");

        assert!(provider.resource_exists(&bucket).await.unwrap());
        assert!(!provider.resource_exists(&table).await.unwrap());

        let calls = provider.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["bucket:data", "table:tasks"]);
    }

    #[test]
    fn test_auth_status_constructors() {
        let ok = AuthStatus::ok("acct");
        assert!(ok.authenticated);
        assert_eq!(ok.account_info.as_deref(), Some("acct"));
        assert!(ok.error.is_none());

        let failed = AuthStatus::failed("expired token");
        assert!(!failed.authenticated);
        assert_eq!(failed.error.as_deref(), Some("expired token"));
    }

    #[test]
    fn test_invoke_echo_is_object_safe() {
        let provider: Box<dyn CloudProvider> = Box::new(RecordingProvider::default());
        let echoed = tokio_test::block_on(
            provider.invoke_function("echo", serde_json::json!({"ping": true})),
        )
        .unwrap();
        assert_eq!(echoed["ping"], true);
    }
}
