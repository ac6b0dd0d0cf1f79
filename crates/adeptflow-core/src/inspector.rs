//! Infrastructure inspection
//!
//! Compares the requirement catalog against what exists in the cloud account
//! and builds readiness reports.

use crate::error::{CoreError, Result};
use crate::template::render_stack_template;
use adeptflow_cloud::{CloudProvider, InfrastructureRequirement};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Object-storage bucket for task data
pub const DEFAULT_BUCKET: &str = "adeptai-task-data";

/// Key-value table for agent tasks
pub const DEFAULT_TABLE: &str = "agent_tasks";

/// Issue line used when the inspection itself fails
pub const CHECK_ERROR_ISSUE: &str = "Error checking infrastructure status";

/// Resources the application needs in the target account
pub fn default_catalog() -> Vec<InfrastructureRequirement> {
    vec![
        InfrastructureRequirement::bucket(DEFAULT_BUCKET),
        InfrastructureRequirement::table(DEFAULT_TABLE),
    ]
}

/// Raw result of checking every requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfrastructureCheck {
    pub ready: bool,
    pub issues: Vec<String>,
    pub missing: Vec<InfrastructureRequirement>,
}

impl InfrastructureCheck {
    pub fn from_missing(missing: Vec<InfrastructureRequirement>) -> Self {
        Self {
            ready: missing.is_empty(),
            issues: missing.iter().map(|r| r.missing_message()).collect(),
            missing,
        }
    }
}

/// Readiness report
///
/// Only buildable through its constructors, which keep `ready` equal to
/// `missing_components().is_empty()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureReport {
    ready: bool,
    missing_components: Vec<InfrastructureRequirement>,
    issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cloud_formation_template: Option<String>,
    last_checked: DateTime<Utc>,
}

impl InfrastructureReport {
    /// Report for a completed check, with the stack template for what is missing
    pub fn from_check(check: InfrastructureCheck, cloud_formation_template: Option<String>) -> Self {
        Self {
            ready: check.missing.is_empty(),
            missing_components: check.missing,
            issues: check.issues,
            cloud_formation_template,
            last_checked: Utc::now(),
        }
    }

    /// Report for a check that could not be completed
    ///
    /// Everything not confirmed present counts as missing.
    pub fn check_failed(unconfirmed: Vec<InfrastructureRequirement>) -> Self {
        Self {
            ready: unconfirmed.is_empty(),
            missing_components: unconfirmed,
            issues: vec![CHECK_ERROR_ISSUE.to_string()],
            cloud_formation_template: None,
            last_checked: Utc::now(),
        }
    }

    /// Build the report matching an inspection error
    pub fn from_error(error: &CoreError, catalog: &[InfrastructureRequirement]) -> Self {
        match error {
            CoreError::Inspection { unconfirmed, .. } => Self::check_failed(unconfirmed.clone()),
            _ => Self::check_failed(catalog.to_vec()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn missing_components(&self) -> &[InfrastructureRequirement] {
        &self.missing_components
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn cloud_formation_template(&self) -> Option<&str> {
        self.cloud_formation_template.as_deref()
    }

    pub fn last_checked(&self) -> DateTime<Utc> {
        self.last_checked
    }
}

/// Checks the requirement catalog through a [`CloudProvider`]
#[derive(Clone)]
pub struct InfrastructureInspector {
    provider: Arc<dyn CloudProvider>,
    catalog: Vec<InfrastructureRequirement>,
}

impl InfrastructureInspector {
    pub fn new(provider: Arc<dyn CloudProvider>, catalog: Vec<InfrastructureRequirement>) -> Self {
        Self { provider, catalog }
    }

    /// Inspector over the default catalog
    pub fn with_default_catalog(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, default_catalog())
    }

    pub fn catalog(&self) -> &[InfrastructureRequirement] {
        &self.catalog
    }

    pub fn provider(&self) -> &Arc<dyn CloudProvider> {
        &self.provider
    }

    /// Whether the configured credentials are accepted
    ///
    /// Any failure (network, rejected credentials) yields `false`.
    #[tracing::instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn check_credentials(&self) -> bool {
        match self.provider.check_auth().await {
            Ok(status) if status.authenticated => {
                debug!(account = ?status.account_info, "Credentials accepted");
                true
            }
            Ok(status) => {
                warn!(error = ?status.error, "Credentials rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Credential check failed");
                false
            }
        }
    }

    /// Check every requirement
    ///
    /// All checks run even when some of them fail. If any check could not be
    /// answered, the failures are aggregated into [`CoreError::Inspection`].
    #[tracing::instrument(skip(self), fields(provider = self.provider.name(), total = self.catalog.len()))]
    pub async fn try_check_infrastructure(&self) -> Result<InfrastructureCheck> {
        let results = join_all(
            self.catalog
                .iter()
                .map(|requirement| self.provider.resource_exists(requirement)),
        )
        .await;

        let mut missing = Vec::new();
        let mut unconfirmed = Vec::new();
        let mut failures = Vec::new();

        for (requirement, result) in self.catalog.iter().zip(results) {
            match result {
                Ok(true) => debug!(resource = %requirement, "Resource present"),
                Ok(false) => {
                    debug!(resource = %requirement, "Resource missing");
                    missing.push(requirement.clone());
                    unconfirmed.push(requirement.clone());
                }
                Err(e) => {
                    warn!(resource = %requirement, error = %e, "Resource check failed");
                    failures.push(format!("{requirement}: {e}"));
                    unconfirmed.push(requirement.clone());
                }
            }
        }

        if !failures.is_empty() {
            return Err(CoreError::Inspection {
                failures,
                unconfirmed,
                total: self.catalog.len(),
            });
        }

        let check = InfrastructureCheck::from_missing(missing);
        info!(ready = check.ready, missing = check.missing.len(), "Infrastructure checked");
        Ok(check)
    }

    /// Check every requirement, folding errors into the result
    pub async fn check_infrastructure(&self) -> InfrastructureCheck {
        match self.try_check_infrastructure().await {
            Ok(check) => check,
            Err(e) => {
                warn!(error = %e, "Infrastructure check failed");
                let unconfirmed = match e {
                    CoreError::Inspection { unconfirmed, .. } => unconfirmed,
                    _ => self.catalog.clone(),
                };
                InfrastructureCheck {
                    ready: false,
                    issues: vec![CHECK_ERROR_ISSUE.to_string()],
                    missing: unconfirmed,
                }
            }
        }
    }

    /// Check the catalog and build a report with the stack template
    pub async fn try_infrastructure_report(&self) -> Result<InfrastructureReport> {
        let check = self.try_check_infrastructure().await?;

        let template = if check.missing.is_empty() {
            None
        } else {
            match render_stack_template(&check.missing) {
                Ok(template) => Some(template),
                Err(e) => {
                    warn!(error = %e, "Failed to render stack template");
                    None
                }
            }
        };

        Ok(InfrastructureReport::from_check(check, template))
    }

    /// Like [`try_infrastructure_report`](Self::try_infrastructure_report),
    /// but a failed check becomes a not-ready report
    pub async fn get_infrastructure_report(&self) -> InfrastructureReport {
        match self.try_infrastructure_report().await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Error getting infrastructure report");
                InfrastructureReport::from_error(&e, &self.catalog)
            }
        }
    }
}
