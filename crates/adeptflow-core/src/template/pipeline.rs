//! CI/CD pipeline catalog
//!
//! The pipeline definitions are fixed documents with placeholders
//! (`YOUR-BUCKET-NAME`, repository secrets) that the operator fills in after
//! download.

use crate::error::CoreError;
use crate::notify::{AppError, ErrorBus, ErrorKind};
use serde::Serialize;
use tracing::{info, warn};

const GITHUB_ACTIONS_WORKFLOW: &str = include_str!("../../templates/github-actions.yml");
const AWS_CODEPIPELINE_TEMPLATE: &str = include_str!("../../templates/aws-codepipeline.yml");

pub const GITHUB_PROVIDER: &str = "github";
pub const AWS_CODEPIPELINE_PROVIDER: &str = "aws-codepipeline";

/// A pipeline definition offered for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CicdPipeline {
    pub name: &'static str,
    pub provider: &'static str,
    pub template: &'static str,
    pub description: &'static str,
}

impl CicdPipeline {
    /// Path the definition is saved under, relative to the project root
    pub fn filename(&self) -> &'static str {
        match self.provider {
            GITHUB_PROVIDER => ".github/workflows/deploy.yml",
            AWS_CODEPIPELINE_PROVIDER => "aws/pipeline.yml",
            _ => "ci-cd-config.yml",
        }
    }
}

/// Result of [`generate_cicd_pipeline`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineArtifact {
    pub success: bool,
    pub template: String,
    pub filename: String,
}

impl PipelineArtifact {
    fn failed() -> Self {
        Self::default()
    }
}

/// GitHub Actions workflow: build job on every push/PR, deploy job on main
pub fn generate_github_actions_workflow() -> &'static str {
    GITHUB_ACTIONS_WORKFLOW
}

/// CloudFormation stack for an AWS-native CodeBuild + CodePipeline setup
pub fn generate_aws_codepipeline_template() -> &'static str {
    AWS_CODEPIPELINE_TEMPLATE
}

pub fn get_available_cicd_pipelines() -> Vec<CicdPipeline> {
    vec![
        CicdPipeline {
            name: "GitHub Actions",
            provider: GITHUB_PROVIDER,
            template: generate_github_actions_workflow(),
            description: "CI/CD workflow using GitHub Actions with AWS deployment",
        },
        CicdPipeline {
            name: "AWS CodePipeline",
            provider: AWS_CODEPIPELINE_PROVIDER,
            template: generate_aws_codepipeline_template(),
            description: "Full AWS-native CI/CD pipeline using CodeBuild and CodePipeline",
        },
    ]
}

/// Look up a pipeline definition by provider id
///
/// Never fails: an unknown provider is logged, reported on `bus` when given,
/// and yields an unsuccessful artifact with empty fields.
pub fn generate_cicd_pipeline(provider: &str, bus: Option<&ErrorBus>) -> PipelineArtifact {
    let Some(pipeline) = get_available_cicd_pipelines()
        .into_iter()
        .find(|p| p.provider == provider)
    else {
        let error = CoreError::UnsupportedProvider(provider.to_string());
        warn!(provider = %provider, error = %error, "CI/CD pipeline generation failed");
        if let Some(bus) = bus {
            bus.report(AppError::new(
                ErrorKind::Configuration,
                format!("Error generating CI/CD pipeline for {provider}: {error}"),
                "Failed to generate CI/CD pipeline configuration",
            ));
        }
        return PipelineArtifact::failed();
    };

    info!(provider = %provider, filename = pipeline.filename(), "Generated CI/CD pipeline");
    PipelineArtifact {
        success: true,
        template: pipeline.template.to_string(),
        filename: pipeline.filename().to_string(),
    }
}
