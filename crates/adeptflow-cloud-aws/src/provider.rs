//! AWS provider implementation

use crate::connection::AwsConnection;
use crate::error::{AwsError, Result};
use adeptflow_cloud::{AuthStatus, CloudProvider};
use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tracing::{debug, info, warn};

/// STS error codes that mean the credentials themselves were rejected
const AUTH_ERROR_CODES: &[&str] = &[
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "AccessDenied",
    "UnrecognizedClientException",
];

/// AWS provider
pub struct AwsProvider {
    region: String,
    sts: aws_sdk_sts::Client,
    s3: aws_sdk_s3::Client,
    dynamodb: aws_sdk_dynamodb::Client,
    secrets: aws_sdk_secretsmanager::Client,
    lambda: aws_sdk_lambda::Client,
}

impl AwsProvider {
    /// Build all service clients from a single static-credential config
    pub async fn connect(connection: &AwsConnection) -> Result<Self> {
        let config = connection.sdk_config().await?;
        debug!(region = %connection.region, "Building AWS service clients");

        Ok(Self {
            region: connection.region.clone(),
            sts: aws_sdk_sts::Client::new(&config),
            s3: aws_sdk_s3::Client::new(&config),
            dynamodb: aws_sdk_dynamodb::Client::new(&config),
            secrets: aws_sdk_secretsmanager::Client::new(&config),
            lambda: aws_sdk_lambda::Client::new(&config),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn caller_account(&self) -> Result<String> {
        match self.sts.get_caller_identity().send().await {
            Ok(identity) => Ok(identity.account().unwrap_or("unknown").to_string()),
            Err(err) => {
                let code = err.code().unwrap_or_default().to_string();
                if AUTH_ERROR_CODES.contains(&code.as_str()) {
                    Err(AwsError::AuthenticationFailed(code))
                } else {
                    Err(sdk_failure("sts:GetCallerIdentity", err))
                }
            }
        }
    }

    async fn head_bucket(&self, name: &str) -> Result<bool> {
        match self.s3.head_bucket().bucket(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false);
                let status = err.raw_response().map(|r| r.status().as_u16());

                match bucket_presence(not_found, status) {
                    Some(BucketPresence::Present) => Ok(true),
                    Some(BucketPresence::Absent) => Ok(false),
                    Some(BucketPresence::Foreign) => {
                        warn!(
                            bucket = %name,
                            "Bucket exists but is not accessible with these credentials; treating as missing"
                        );
                        Ok(false)
                    }
                    None => Err(sdk_failure("s3:HeadBucket", err)),
                }
            }
        }
    }

    async fn describe_table(&self, name: &str) -> Result<bool> {
        match self.dynamodb.describe_table().table_name(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_resource_not_found_exception())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(sdk_failure("dynamodb:DescribeTable", err))
                }
            }
        }
    }

    async fn secret_value(&self, name: &str) -> Result<String> {
        let output = self
            .secrets
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|err| sdk_failure("secretsmanager:GetSecretValue", err))?;

        output
            .secret_string()
            .map(|s| s.to_string())
            .ok_or_else(|| AwsError::SecretNotString(name.to_string()))
    }

    async fn invoke(&self, name: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let body = serde_json::to_vec(payload)?;

        let output = self
            .lambda
            .invoke()
            .function_name(name)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|err| sdk_failure("lambda:Invoke", err))?;

        let response = match output.payload() {
            Some(blob) if !blob.as_ref().is_empty() => serde_json::from_slice(blob.as_ref())?,
            _ => serde_json::Value::Null,
        };

        if let Some(kind) = output.function_error() {
            let message = response
                .get("errorMessage")
                .and_then(|m| m.as_str())
                .unwrap_or(kind)
                .to_string();
            return Err(AwsError::FunctionError {
                function: name.to_string(),
                message,
            });
        }

        Ok(response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketPresence {
    Present,
    Absent,
    /// Name taken by another account or access denied
    Foreign,
}

/// Classify a failed HeadBucket call
///
/// 301 means the bucket lives in another region of the same account. 403
/// means the name is owned elsewhere, so it cannot serve this account.
fn bucket_presence(not_found: bool, status: Option<u16>) -> Option<BucketPresence> {
    if not_found {
        return Some(BucketPresence::Absent);
    }
    match status {
        Some(404) => Some(BucketPresence::Absent),
        Some(301) => Some(BucketPresence::Present),
        Some(403) => Some(BucketPresence::Foreign),
        _ => None,
    }
}

/// Map an SDK failure to network vs service errors
fn sdk_failure<E, R>(operation: &str, err: SdkError<E, R>) -> AwsError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let detail = format!("{operation}: {}", DisplayErrorContext(&err));
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => AwsError::Network(detail),
        _ => AwsError::Service(detail),
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    fn display_name(&self) -> &str {
        "Amazon Web Services"
    }

    async fn check_auth(&self) -> adeptflow_cloud::Result<AuthStatus> {
        match self.caller_account().await {
            Ok(account) => {
                info!(account = %account, region = %self.region, "AWS credentials verified");
                Ok(AuthStatus::ok(account))
            }
            Err(e) => Ok(AuthStatus::failed(e.to_string())),
        }
    }

    async fn bucket_exists(&self, name: &str) -> adeptflow_cloud::Result<bool> {
        debug!(bucket = %name, "Checking S3 bucket");
        Ok(self.head_bucket(name).await?)
    }

    async fn table_exists(&self, name: &str) -> adeptflow_cloud::Result<bool> {
        debug!(table = %name, "Checking DynamoDB table");
        Ok(self.describe_table(name).await?)
    }

    async fn get_secret(&self, name: &str) -> adeptflow_cloud::Result<String> {
        debug!(secret = %name, "Fetching secret");
        Ok(self.secret_value(name).await?)
    }

    async fn invoke_function(
        &self,
        name: &str,
        payload: serde_json::Value,
    ) -> adeptflow_cloud::Result<serde_json::Value> {
        debug!(function = %name, "Invoking Lambda function");
        Ok(self.invoke(name, &payload).await?)
    }
}
