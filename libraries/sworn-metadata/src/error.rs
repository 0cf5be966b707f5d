//! Metadata-specific errors

use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Extension not in the import list
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Path cannot be expressed as a `file://` URL
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Blocking probe task did not complete
    #[error("Probe task failed: {0}")]
    Task(String),
}
