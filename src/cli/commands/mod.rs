//! CLI command implementations

pub mod convert;
pub mod init;
pub mod variant;

use crate::cli::error::CliError;
use crate::config::ShowcaseConfig;
use std::path::Path;
use tracing::warn;

/// Load the workspace configuration, defaults when there is none
pub fn load_config(workspace: &Path) -> Result<ShowcaseConfig, CliError> {
    Ok(ShowcaseConfig::load(workspace)?)
}

/// Load the workspace configuration, falling back to defaults when it cannot be read
///
/// Used by the conversion commands, which only take output preferences from it.
pub fn load_config_or_default(workspace: &Path) -> ShowcaseConfig {
    ShowcaseConfig::load(workspace).unwrap_or_else(|e| {
        warn!("Ignoring workspace configuration: {}", e);
        ShowcaseConfig::default()
    })
}
