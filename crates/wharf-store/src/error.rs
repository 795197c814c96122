//! Error types for backup storage operations.

use wharf_types::Cid;

/// Errors that can occur during backup storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No staged object exists to install for this address.
    #[error("no staged object for {0}")]
    NotStaged(Cid),

    /// An I/O error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
