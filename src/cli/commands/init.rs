//! Init command implementation

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, ShowcaseConfig, sample_config};
use std::path::{Path, PathBuf};

/// Write a commented `.showcase.toml` into the workspace
pub fn handle_init(workspace: &Path, force: bool) -> Result<PathBuf, CliError> {
    if ShowcaseConfig::exists(workspace) && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists in {}. Use --force to overwrite.",
            CONFIG_FILENAME,
            workspace.display()
        )));
    }

    let path = workspace.join(CONFIG_FILENAME);
    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;

    println!("Wrote {}", path.display());
    Ok(path)
}
