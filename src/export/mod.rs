//! Export functionality
//!
//! Provides exporters for external profile formats:
//! - DoYouBuzz profile import (JSON)

pub mod doyoubuzz;

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Export error: {0}")]
    ExportError(String),
}

// Re-export for convenience
pub use doyoubuzz::DoYouBuzzExporter;
