//! Error types for backup synchronization.

use wharf_store::StoreError;

/// Errors that abort a sync run.
///
/// Per-address fetch failures are not here: they are recoverable, collected
/// into the [`SyncReport`](crate::SyncReport) and surfaced at the end.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The local backup store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
