//! Workspace configuration file support
//!
//! Handles parsing of `.showcase.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".showcase.toml";

/// Default directory holding the showcase variants
pub const DEFAULT_STORE_DIR: &str = "showcases";

/// Default name of the baseline showcase
pub const DEFAULT_BASELINE: &str = "baseline";

/// Environment variable for the store directory
pub const ENV_STORE_DIR: &str = "SHOWCASE_DIR";

/// Environment variable for the baseline name
pub const ENV_BASELINE: &str = "SHOWCASE_BASELINE";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Variant store configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Directory of `<name>.yaml` showcases (relative to workspace, or absolute)
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Name of the protected baseline showcase
    #[serde(default = "default_baseline")]
    pub baseline: String,
}

fn default_store_dir() -> String {
    DEFAULT_STORE_DIR.to_string()
}

fn default_baseline() -> String {
    DEFAULT_BASELINE.to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            baseline: default_baseline(),
        }
    }
}

/// Export configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Write indented platform JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.showcase.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShowcaseConfig {
    /// Variant store configuration
    #[serde(default)]
    pub store: StoreSection,

    /// Export configuration
    #[serde(default)]
    pub export: ExportSection,
}

impl ShowcaseConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a workspace directory
    ///
    /// Looks for `.showcase.toml` in the workspace directory.
    /// Falls back to defaults if not found.
    pub fn load(workspace_path: &Path) -> Result<Self, ConfigError> {
        let config_path = workspace_path.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a workspace directory
    pub fn save(&self, workspace_path: &Path) -> Result<(), ConfigError> {
        let config_path = workspace_path.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_STORE_DIR)
            && !dir.is_empty()
        {
            self.store.dir = dir;
        }

        if let Some(baseline) = lookup(ENV_BASELINE)
            && !baseline.is_empty()
        {
            self.store.baseline = baseline;
        }
    }

    /// Get the store directory for a workspace
    pub fn store_dir(&self, workspace_path: &Path) -> PathBuf {
        if self.store.dir.is_empty() {
            workspace_path.join(DEFAULT_STORE_DIR)
        } else if Path::new(&self.store.dir).is_absolute() {
            PathBuf::from(&self.store.dir)
        } else {
            workspace_path.join(&self.store.dir)
        }
    }

    /// Check if configuration exists in a workspace
    pub fn exists(workspace_path: &Path) -> bool {
        workspace_path.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# CV showcase configuration

[store]
# Directory of <name>.yaml showcases (relative to workspace, or absolute)
dir = "showcases"

# Showcase that variants are created from; it cannot be deleted or renamed
baseline = "baseline"

[export]
# Indent the platform JSON written by toPlatform
pretty = true
"#
}
