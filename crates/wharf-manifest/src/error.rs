//! Error types for manifest operations.

/// Errors that can occur while building or persisting a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The record selection was empty; a silently empty manifest is never
    /// produced.
    #[error("no records to build a manifest from")]
    EmptySelection,

    /// An I/O error occurred while reading or writing the manifest document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest document could not be serialized or parsed.
    #[error("manifest document error: {0}")]
    Document(#[from] serde_json::Error),
}
