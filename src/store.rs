//! Showcase variant store
//!
//! A directory of `<name>.yaml` showcases. One of them, the baseline, is the
//! document imported from the platform; the others are variants derived from
//! it (or from each other) and tailored for a given audience.

use crate::config::ShowcaseConfig;
use crate::models::{Showcase, VariantInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Extension of the showcase files in the store
pub const SHOWCASE_EXTENSION: &str = "yaml";

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Showcase not found: {0}")]
    NotFound(String),
    #[error("Showcase already exists: {0}")]
    AlreadyExists(String),
    #[error("The baseline showcase '{0}' cannot be deleted or renamed")]
    ProtectedBaseline(String),
    #[error("Invalid showcase name: {0:?}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Summary of one stored showcase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseInfo {
    pub name: String,
    pub is_baseline: bool,
    /// File size in KiB
    pub size_kb: f64,
    pub modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantInfo>,
}

/// Directory-backed collection of named showcases
#[derive(Debug, Clone)]
pub struct ShowcaseStore {
    dir: PathBuf,
    baseline: String,
}

impl ShowcaseStore {
    /// Create a store over `dir`, protecting the showcase named `baseline`
    pub fn new(dir: impl Into<PathBuf>, baseline: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            baseline: baseline.into(),
        }
    }

    /// Create the store described by a workspace configuration
    pub fn from_config(config: &ShowcaseConfig, workspace_path: &Path) -> Self {
        Self::new(config.store_dir(workspace_path), config.store.baseline.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn is_baseline(&self, name: &str) -> bool {
        name == self.baseline
    }

    /// Path of the file holding `name`
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, SHOWCASE_EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// List showcase names, baseline first and the rest alphabetically
    ///
    /// A missing store directory lists as empty.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(|e| {
            StoreError::IoError(format!("Failed to read {}: {}", self.dir.display(), e))
        })? {
            let entry = entry.map_err(|e| StoreError::IoError(e.to_string()))?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(SHOWCASE_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }

        names.sort_by(|a, b| {
            (!self.is_baseline(a), a.as_str()).cmp(&(!self.is_baseline(b), b.as_str()))
        });
        Ok(names)
    }

    /// Load a showcase by name
    pub fn load(&self, name: &str) -> Result<Showcase, StoreError> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            StoreError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Showcase::from_yaml(&content).map_err(|e| {
            StoreError::SerializationError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save a showcase, creating the store directory if needed
    ///
    /// Bare-string entries are written in canonical form, each with its
    /// `_dyb_id` and `_dyb_sort`.
    pub fn save(&self, name: &str, showcase: &Showcase) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError::IoError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let mut canonical = showcase.clone();
        canonical.canonicalize();
        let yaml = canonical.to_yaml().map_err(|e| {
            StoreError::SerializationError(format!("Failed to serialize showcase: {}", e))
        })?;
        let path = self.path(name);
        std::fs::write(&path, yaml).map_err(|e| {
            StoreError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!("Saved showcase '{}' to {}", name, path.display());
        Ok(path)
    }

    /// Create `variant` as a copy of `source`, recording where it came from
    ///
    /// # Arguments
    ///
    /// * `source` - Name of an existing showcase
    /// * `variant` - Name of the new showcase; must not exist yet
    /// * `description` - Free text stored in the variant's `_variant_info`
    ///
    /// # Returns
    ///
    /// The new variant as written to the store.
    pub fn create_variant(
        &self,
        source: &str,
        variant: &str,
        description: &str,
    ) -> Result<Showcase, StoreError> {
        validate_name(source)?;
        validate_name(variant)?;
        if self.exists(variant) {
            return Err(StoreError::AlreadyExists(variant.to_string()));
        }

        let mut showcase = self.load(source)?;
        showcase.variant_info = Some(VariantInfo {
            created_from: source.to_string(),
            created_at: Utc::now().to_rfc3339(),
            description: description.to_string(),
        });
        self.save(variant, &showcase)?;

        info!("Created variant '{}' from '{}'", variant, source);
        Ok(showcase)
    }

    /// Delete a showcase. The baseline cannot be deleted.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        if self.is_baseline(name) {
            return Err(StoreError::ProtectedBaseline(name.to_string()));
        }
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        std::fs::remove_file(&path).map_err(|e| {
            StoreError::IoError(format!("Failed to delete {}: {}", path.display(), e))
        })?;

        info!("Deleted showcase '{}'", name);
        Ok(())
    }

    /// Rename a showcase. The baseline cannot be renamed, and `new_name` must be free.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        validate_name(old_name)?;
        validate_name(new_name)?;
        if self.is_baseline(old_name) {
            return Err(StoreError::ProtectedBaseline(old_name.to_string()));
        }
        let old_path = self.path(old_name);
        if !old_path.is_file() {
            return Err(StoreError::NotFound(old_name.to_string()));
        }
        let new_path = self.path(new_name);
        if new_path.exists() {
            return Err(StoreError::AlreadyExists(new_name.to_string()));
        }
        std::fs::rename(&old_path, &new_path).map_err(|e| {
            StoreError::IoError(format!(
                "Failed to rename {} to {}: {}",
                old_path.display(),
                new_path.display(),
                e
            ))
        })?;

        info!("Renamed showcase '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    /// File and variant details of a showcase
    pub fn info(&self, name: &str) -> Result<ShowcaseInfo, StoreError> {
        let showcase = self.load(name)?;
        let path = self.path(name);
        let metadata = std::fs::metadata(&path).map_err(|e| {
            StoreError::IoError(format!("Failed to stat {}: {}", path.display(), e))
        })?;
        let modified = metadata.modified().map_err(|e| {
            StoreError::IoError(format!("Failed to read modification time: {}", e))
        })?;

        Ok(ShowcaseInfo {
            name: name.to_string(),
            is_baseline: self.is_baseline(name),
            size_kb: metadata.len() as f64 / 1024.0,
            modified: DateTime::<Utc>::from(modified),
            variant: showcase.variant_info,
        })
    }
}

/// Names map to files directly under the store directory.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.starts_with('.')
        || name.contains(['/', '\\'])
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Experience};
    use tempfile::TempDir;

    fn store_with_baseline() -> (TempDir, ShowcaseStore) {
        let temp = TempDir::new().unwrap();
        let store = ShowcaseStore::new(temp.path().join("showcases"), "baseline");
        let showcase = Showcase::from_yaml("personal_info:\n  name: Ada Lovelace\n").unwrap();
        store.save("baseline", &showcase).unwrap();
        (temp, store)
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = ShowcaseStore::new(temp.path().join("nope"), "baseline");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_baseline_first() {
        let (_temp, store) = store_with_baseline();
        let showcase = store.load("baseline").unwrap();
        store.save("zeta", &showcase).unwrap();
        store.save("alpha", &showcase).unwrap();
        std::fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["baseline", "alpha", "zeta"]);
    }

    #[test]
    fn test_create_variant_records_origin() {
        let (_temp, store) = store_with_baseline();
        let variant = store
            .create_variant("baseline", "data-eng", "For data roles")
            .unwrap();

        let info = variant.variant_info.unwrap();
        assert_eq!(info.created_from, "baseline");
        assert_eq!(info.description, "For data roles");
        assert!(DateTime::parse_from_rfc3339(&info.created_at).is_ok());

        let loaded = store.load("data-eng").unwrap();
        assert_eq!(loaded.personal_info.name, "Ada Lovelace");
        assert!(loaded.variant_info.is_some());
    }

    #[test]
    fn test_create_variant_failures() {
        let (_temp, store) = store_with_baseline();
        assert!(matches!(
            store.create_variant("missing", "v1", ""),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.create_variant("baseline", "baseline", ""),
            Err(StoreError::AlreadyExists(_))
        ));
        assert!(matches!(
            store.create_variant("baseline", "", ""),
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.create_variant("", "v1", ""),
            Err(StoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_baseline_is_protected() {
        let (_temp, store) = store_with_baseline();
        assert!(matches!(
            store.delete("baseline"),
            Err(StoreError::ProtectedBaseline(_))
        ));
        assert!(matches!(
            store.rename("baseline", "other"),
            Err(StoreError::ProtectedBaseline(_))
        ));
        assert!(store.exists("baseline"));
    }

    #[test]
    fn test_delete_and_rename() {
        let (_temp, store) = store_with_baseline();
        store.create_variant("baseline", "v1", "").unwrap();
        store.create_variant("baseline", "v2", "").unwrap();

        assert!(matches!(
            store.rename("v1", "v2"),
            Err(StoreError::AlreadyExists(_))
        ));
        store.rename("v1", "v3").unwrap();
        assert!(!store.exists("v1"));
        assert!(store.exists("v3"));

        store.delete("v3").unwrap();
        assert!(matches!(store.delete("v3"), Err(StoreError::NotFound(_))));
        assert_eq!(store.list().unwrap(), vec!["baseline", "v2"]);
    }

    #[test]
    fn test_info() {
        let (_temp, store) = store_with_baseline();
        store.create_variant("baseline", "v1", "short").unwrap();

        let baseline = store.info("baseline").unwrap();
        assert!(baseline.is_baseline);
        assert!(baseline.size_kb > 0.0);
        assert!(baseline.variant.is_none());

        let variant = store.info("v1").unwrap();
        assert!(!variant.is_baseline);
        assert_eq!(variant.variant.unwrap().description, "short");

        assert!(matches!(store.info("ghost"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_writes_canonical_entries() {
        let (_temp, store) = store_with_baseline();
        let mut showcase = store.load("baseline").unwrap();
        showcase.experience.push(Experience {
            missions: vec![Entry::from("New")],
            ..Default::default()
        });
        store.save("baseline", &showcase).unwrap();

        let content = std::fs::read_to_string(store.path("baseline")).unwrap();
        assert!(content.contains("description: New"), "{}", content);
        let reloaded = store.load("baseline").unwrap();
        let mission = &reloaded.experience[0].missions[0];
        assert!(matches!(mission, Entry::Tracked(_)));
        assert_eq!(mission.id(), Some(100_000_000));
        assert_eq!(mission.sort(), Some(0));
        // the caller's copy is left as it was
        assert!(matches!(showcase.experience[0].missions[0], Entry::Plain(_)));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", " ", "../x", "a/b", ".hidden", " padded"] {
            assert!(validate_name(name).is_err(), "{:?} accepted", name);
        }
        assert!(validate_name("data-eng_2024").is_ok());
    }
}
