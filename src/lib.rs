//! CV Showcase - edit a résumé as YAML and round-trip it through DoYouBuzz
//!
//! Provides:
//! - Import of a DoYouBuzz profile export into an editable showcase
//! - Export of a showcase back to the DoYouBuzz import format
//! - A store of named showcase variants
//! - Configuration loading

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod models;
pub mod store;

pub use config::{ConfigError, ShowcaseConfig};
pub use export::{DoYouBuzzExporter, ExportError};
pub use import::{DoYouBuzzImporter, ImportError, ImportOutcome};
pub use models::{ProfileMetadata, Showcase};
pub use store::{ShowcaseInfo, ShowcaseStore, StoreError};
