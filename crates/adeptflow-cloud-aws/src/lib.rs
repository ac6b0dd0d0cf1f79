//! AWS provider for AdeptFlow
//!
//! This crate implements the [`CloudProvider`](adeptflow_cloud::CloudProvider)
//! trait on top of the AWS SDK for Rust.
//!
//! # Capabilities
//!
//! - Credential check via STS `GetCallerIdentity`
//! - S3 bucket existence via `HeadBucket`
//! - DynamoDB table existence via `DescribeTable`
//! - Secret retrieval via Secrets Manager `GetSecretValue`
//! - Lambda function invocation with JSON payloads
//!
//! # Example
//!
//! ```ignore
//! use adeptflow_cloud::CloudProvider;
//! use adeptflow_cloud_aws::{AwsConnection, AwsProvider};
//!
//! let connection = AwsConnection::new("us-east-1", "AKIA...", "secret");
//! let provider = AwsProvider::connect(&connection).await?;
//!
//! let auth = provider.check_auth().await?;
//! if !auth.authenticated {
//!     panic!("Not authenticated: {:?}", auth.error);
//! }
//!
//! let exists = provider.bucket_exists("adeptai-task-data").await?;
//! ```

pub mod connection;
pub mod error;
pub mod provider;

pub use connection::AwsConnection;
pub use error::{AwsError, Result};
pub use provider::AwsProvider;
