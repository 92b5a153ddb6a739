//! Import functionality
//!
//! Provides importers for external profile formats:
//! - DoYouBuzz profile export (JSON)

pub mod doyoubuzz;

use crate::models::Showcase;

/// Result of an import operation.
///
/// Contains the showcase and the verbatim input, kept as an export template.
#[derive(Debug, Clone)]
#[must_use = "import outcomes hold the converted showcase and should be saved"]
pub struct ImportOutcome {
    /// Editable showcase, with round-trip metadata attached
    pub showcase: Showcase,
    /// The parsed input, unchanged
    pub template: serde_json::Value,
}

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

// Re-export for convenience
pub use doyoubuzz::DoYouBuzzImporter;
