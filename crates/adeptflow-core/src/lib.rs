//! AdeptFlow core
//!
//! Credential persistence, infrastructure inspection, readiness orchestration
//! and artifact generation. Cloud access goes through
//! [`CloudProvider`](adeptflow_cloud::CloudProvider), so nothing in this crate
//! depends on a concrete SDK.
//!
//! # Flow
//!
//! ```text
//! CredentialStore ─▶ ReadinessOrchestrator ─▶ InfrastructureInspector
//!                                                   │
//!                              artifact ◀── templates ◀── InfrastructureReport
//! ```

pub mod credentials;
pub mod deployment;
pub mod error;
pub mod inspector;
pub mod notify;
pub mod orchestrator;
pub mod template;

pub use credentials::{AppCredentials, AwsCredentials, CredentialStore, Credentials};
pub use deployment::{
    DeploymentCheck, DeploymentEnvironment, EnvironmentStatus, ProductionReadiness,
    check_production_readiness, deployment_environments, generate_deployment_docs,
};
pub use error::{CoreError, Result};
pub use inspector::{
    InfrastructureCheck, InfrastructureInspector, InfrastructureReport, default_catalog,
};
pub use notify::{AppError, ErrorBus, ErrorKind, ErrorSubscription};
pub use orchestrator::{
    ProviderFactory, ReadinessOrchestrator, ReadinessPhase, ReadinessSnapshot, RefreshOutcome,
};
