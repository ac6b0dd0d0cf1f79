//! AWS provider error types

use adeptflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Invalid AWS configuration: {0}")]
    InvalidConfig(String),

    #[error("AWS authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("AWS endpoint unreachable: {0}")]
    Network(String),

    #[error("AWS service error: {0}")]
    Service(String),

    #[error("Secret has no string value: {0}")]
    SecretNotString(String),

    #[error("Lambda function {function} failed: {message}")]
    FunctionError { function: String, message: String },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::InvalidConfig(msg) => CloudError::InvalidConfig(msg),
            AwsError::AuthenticationFailed(msg) => CloudError::AuthenticationFailed(msg),
            AwsError::Network(msg) => CloudError::Network(msg),
            AwsError::Service(msg) => CloudError::ApiError(msg),
            AwsError::SecretNotString(name) => CloudError::ResourceNotFound(name),
            AwsError::FunctionError { function, message } => {
                CloudError::InvocationFailed(format!("{function}: {message}"))
            }
            AwsError::JsonError(e) => CloudError::Json(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
