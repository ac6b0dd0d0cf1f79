//! Artifact generation
//!
//! - [`stack`]: stack template for missing resources (tera)
//! - [`pipeline`]: fixed CI/CD pipeline definitions
//! - [`artifact`]: writing generated documents to disk

pub mod artifact;
pub mod pipeline;
pub mod stack;

pub use artifact::{MIME_TYPE, handle_download_template};
pub use pipeline::{
    AWS_CODEPIPELINE_PROVIDER, CicdPipeline, GITHUB_PROVIDER, PipelineArtifact,
    generate_aws_codepipeline_template, generate_cicd_pipeline, generate_github_actions_workflow,
    get_available_cicd_pipelines,
};
pub use stack::{STACK_TEMPLATE_FILENAME, render_stack_template};
