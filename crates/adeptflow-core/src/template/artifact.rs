//! Artifact hand-off
//!
//! Writes generated documents to disk. The content goes to a temporary file
//! in the target directory first and is renamed into place, so a partially
//! written artifact never appears under the final name.

use crate::error::{CoreError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// MIME type of every generated artifact
pub const MIME_TYPE: &str = "text/yaml";

/// Write `template` to `output_dir/filename`, creating parent directories
///
/// `filename` may contain directories (`.github/workflows/deploy.yml`).
/// Returns the final path.
pub fn handle_download_template(
    output_dir: &Path,
    filename: &str,
    template: &str,
) -> Result<PathBuf> {
    let relative = Path::new(filename);
    if filename.is_empty() || relative.is_absolute() || relative.components().any(is_parent) {
        return Err(CoreError::Artifact {
            path: output_dir.join(filename),
            message: "artifact file name must be a relative path inside the output directory"
                .to_string(),
        });
    }

    let target = output_dir.join(relative);
    let artifact_error = |message: String| CoreError::Artifact {
        path: target.clone(),
        message,
    };

    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir.to_path_buf());
    std::fs::create_dir_all(&dir).map_err(|e| artifact_error(e.to_string()))?;

    // dropped (and removed) on any early return
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| artifact_error(e.to_string()))?;
    tmp.write_all(template.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| artifact_error(e.to_string()))?;
    tmp.persist(&target)
        .map_err(|e| artifact_error(e.error.to_string()))?;

    info!(
        path = %target.display(),
        mime_type = MIME_TYPE,
        bytes = template.len(),
        "Saved artifact"
    );
    Ok(target)
}

fn is_parent(component: std::path::Component<'_>) -> bool {
    matches!(component, std::path::Component::ParentDir)
}
