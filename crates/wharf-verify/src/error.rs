//! Error types for verification.

use wharf_ipfs::ToolError;
use wharf_store::StoreError;

/// Errors that abort a verification run.
///
/// `missing` and `mismatch` outcomes are statuses, not errors; a one-off
/// hash tool failure is collected into the report. Only precondition
/// failures end the run.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The local backup store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The hash tool is not available at all.
    #[error(transparent)]
    Tool(#[from] ToolError),
}
