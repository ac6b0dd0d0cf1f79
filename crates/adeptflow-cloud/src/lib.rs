//! AdeptFlow Cloud Abstraction
//!
//! This crate provides the cloud provider abstraction used by AdeptFlow's
//! readiness checks. Everything that talks to a real cloud sits behind the
//! [`CloudProvider`] trait so the inspection and orchestration logic can treat
//! the provider as a black box.
//!
//! # Supported Providers
//!
//! - **AWS**: S3 buckets, DynamoDB tables, Secrets Manager, Lambda
//!   (see `adeptflow-cloud-aws`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  AdeptFlow CLI                   │
//! │           (adept check / adept readiness)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                adeptflow-core                    │
//! │   Orchestrator ─▶ Inspector ─▶ Templates         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               adeptflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait CloudProvider { ... }              │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌───────────────────────┐                      │
//! │  │ Requirement catalog   │                      │
//! │  └───────────────────────┘                      │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │      aws      │
//! │   provider    │
//! └───────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod requirement;

// Re-exports
pub use error::{CloudError, Result};
pub use provider::{AuthStatus, CloudProvider};
pub use requirement::{InfrastructureRequirement, ResourceKind};
