use std::path::{Path, PathBuf};

use crate::descriptor::ServiceBundleDescriptor;

/// Name of the generated bundle descriptor.
pub const APB_FILE: &str = "apb.yml";
/// Name of the generated build recipe.
pub const DOCKERFILE: &str = "Dockerfile";

const OUTPUT_FILES: [&str; 2] = [APB_FILE, DOCKERFILE];

/// Returns the generated files that already exist in `dir`.
pub fn existing_outputs(dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    let mut existing = Vec::new();
    for name in OUTPUT_FILES {
        let path = dir.join(name);
        let exists = path.try_exists().map_err(|e| OutputError::Stat {
            path: path.clone(),
            source: e,
        })?;
        if exists {
            existing.push(path);
        }
    }
    Ok(existing)
}

/// Writes `apb.yml` and `Dockerfile` into `dir`.
///
/// Unless `force` is set, nothing is written when either file already exists.
pub fn write_outputs(
    dir: &Path,
    descriptor: &ServiceBundleDescriptor,
    dockerfile_content: &str,
    force: bool,
) -> Result<Vec<PathBuf>, OutputError> {
    if !force {
        let existing = existing_outputs(dir)?;
        if !existing.is_empty() {
            return Err(OutputError::AlreadyExists(existing));
        }
    }

    let apb_yaml = descriptor
        .to_yaml()
        .map_err(|e| OutputError::Serialize { source: e })?;

    let apb_path = dir.join(APB_FILE);
    write_file(&apb_path, &apb_yaml)?;
    tracing::debug!(path = %apb_path.display(), "wrote bundle descriptor");

    let dockerfile_path = dir.join(DOCKERFILE);
    write_file(&dockerfile_path, dockerfile_content)?;
    tracing::debug!(path = %dockerfile_path.display(), "wrote Dockerfile");

    Ok(vec![apb_path, dockerfile_path])
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    std::fs::write(path, content).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to check whether {path} exists")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("use --force to overwrite existing apb.yml and/or Dockerfile")]
    AlreadyExists(Vec<PathBuf>),
    #[error("failed to serialize apb.yml")]
    Serialize { source: serde_yaml::Error },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
