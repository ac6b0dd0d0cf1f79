//! Deployment readiness

use crate::inspector::InfrastructureInspector;
use crate::template::get_available_cicd_pipelines;
use adeptflow_cloud::{InfrastructureRequirement, ResourceKind};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentStatus {
    Ready,
    NotConfigured,
    Incomplete,
}

impl std::fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentStatus::Ready => write!(f, "ready"),
            EnvironmentStatus::NotConfigured => write!(f, "not-configured"),
            EnvironmentStatus::Incomplete => write!(f, "incomplete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironment {
    pub name: String,
    pub status: EnvironmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_deployment: Option<String>,
}

/// One named readiness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionReadiness {
    pub ready: bool,
    pub checks: Vec<DeploymentCheck>,
}

/// Run every production check; ready only when all of them pass
pub async fn check_production_readiness(inspector: &InfrastructureInspector) -> ProductionReadiness {
    let credentials_valid = inspector.check_credentials().await;
    let report = inspector.get_infrastructure_report().await;

    let checks = vec![
        DeploymentCheck {
            name: "AWS Credentials".to_string(),
            passed: credentials_valid,
            message: if credentials_valid {
                "AWS credentials are valid"
            } else {
                "AWS credentials are missing or invalid"
            }
            .to_string(),
        },
        DeploymentCheck {
            name: "AWS Infrastructure".to_string(),
            passed: report.is_ready(),
            message: if report.is_ready() {
                "All required AWS resources are available"
            } else {
                "Missing required AWS resources"
            }
            .to_string(),
        },
    ];

    ProductionReadiness {
        ready: checks.iter().all(|c| c.passed),
        checks,
    }
}

pub fn deployment_environments() -> Vec<DeploymentEnvironment> {
    vec![
        DeploymentEnvironment {
            name: "Development".to_string(),
            status: EnvironmentStatus::Ready,
            url: Some("https://dev.example.com".to_string()),
            last_deployment: None,
        },
        DeploymentEnvironment {
            name: "Staging".to_string(),
            status: EnvironmentStatus::NotConfigured,
            url: None,
            last_deployment: None,
        },
        DeploymentEnvironment {
            name: "Production".to_string(),
            status: EnvironmentStatus::Incomplete,
            url: None,
            last_deployment: None,
        },
    ]
}

/// Markdown deployment guide listing the required resources
pub fn generate_deployment_docs(catalog: &[InfrastructureRequirement]) -> String {
    let mut doc = String::from(
        "# Deployment Guide

## Prerequisites
- AWS account with proper permissions
- GitHub account (if using GitHub Actions)
- Node.js v18 or higher
- npm v9 or higher

## Manual Deployment Steps
1. Build the application: `npm run build`
2. Deploy to S3: `aws s3 sync dist s3://YOUR-BUCKET-NAME`
3. Invalidate CloudFront cache (if using CloudFront)

## Automated Deployment
This project includes CI/CD configuration for:
",
    );

    for pipeline in get_available_cicd_pipelines() {
        let _ = writeln!(doc, "- {}", pipeline.name);
    }
    doc.push_str(
        "\nChoose the CI/CD solution that best fits your workflow and follow the setup \
         instructions in the downloaded configuration file.\n\n## Required AWS Resources\n",
    );

    for (kind, heading) in [
        (ResourceKind::Bucket, "S3 buckets"),
        (ResourceKind::Table, "DynamoDB tables"),
    ] {
        let names: Vec<_> = catalog.iter().filter(|r| r.kind == kind).collect();
        if names.is_empty() {
            continue;
        }
        let _ = writeln!(doc, "- {heading}:");
        for requirement in names {
            let _ = writeln!(doc, "  - `{}`", requirement.name);
        }
    }

    doc.push_str("\nRun `adept check --write-template` to generate a stack template for missing resources.\n");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::tests::{Answer, FakeProvider};
    use crate::inspector::{DEFAULT_TABLE, default_catalog};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ready_when_all_pass() {
        let inspector = InfrastructureInspector::with_default_catalog(Arc::new(FakeProvider::new(true)));

        let readiness = check_production_readiness(&inspector).await;

        assert!(readiness.ready);
        let names: Vec<_> = readiness.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AWS Credentials", "AWS Infrastructure"]);
    }

    #[tokio::test]
    async fn test_missing_resource_fails_infrastructure_check() {
        let inspector = InfrastructureInspector::with_default_catalog(Arc::new(
            FakeProvider::new(true).answer(DEFAULT_TABLE, Answer::Missing),
        ));

        let readiness = check_production_readiness(&inspector).await;

        assert!(!readiness.ready);
        assert!(readiness.checks[0].passed);
        assert!(!readiness.checks[1].passed);
        assert_eq!(readiness.checks[1].message, "Missing required AWS resources");
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let inspector =
            InfrastructureInspector::with_default_catalog(Arc::new(FakeProvider::new(false)));

        let readiness = check_production_readiness(&inspector).await;

        assert!(!readiness.ready);
        assert_eq!(
            readiness.checks[0].message,
            "AWS credentials are missing or invalid"
        );
    }

    #[test]
    fn test_environments() {
        let envs = deployment_environments();
        assert_eq!(envs.len(), 3);
        assert_eq!(envs[0].url.as_deref(), Some("https://dev.example.com"));
        assert_eq!(envs[1].status.to_string(), "not-configured");
        assert_eq!(
            serde_json::to_value(&envs[2]).unwrap()["status"],
            "incomplete"
        );
    }

    #[test]
    fn test_docs_list_catalog() {
        let docs = generate_deployment_docs(&default_catalog());
        assert!(docs.starts_with("# Deployment Guide"));
        assert!(docs.contains("- GitHub Actions\n- AWS CodePipeline\n"));
        assert!(docs.contains("- S3 buckets:\n  - `adeptai-task-data`"));
        assert!(docs.contains("- DynamoDB tables:\n  - `agent_tasks`"));
    }
}
