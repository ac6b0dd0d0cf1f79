use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded: {needed} bytes requested, {limit} bytes available")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage file is corrupt: {path}\nreason: {message}")]
    CorruptStorage { path: PathBuf, message: String },

    #[error(
        "Infrastructure check failed for {} of {total} resources: {}",
        .failures.len(),
        .failures.join("; ")
    )]
    Inspection {
        /// One line per check that could not be answered
        failures: Vec<String>,
        /// Requirements not confirmed present (missing or unanswered)
        unconfirmed: Vec<adeptflow_cloud::InfrastructureRequirement>,
        total: usize,
    },

    #[error("Unsupported CI/CD provider: {0}")]
    UnsupportedProvider(String),

    #[error("Template render error: {0}")]
    TemplateRender(String),

    #[error("Failed to write artifact: {path}\nreason: {message}")]
    Artifact { path: PathBuf, message: String },

    #[error("Cloud error: {0}")]
    Cloud(#[from] adeptflow_cloud::CloudError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
