//! Error types for external tool invocations.

use std::path::PathBuf;

use wharf_types::Cid;

/// Errors raised while driving the external fetch/hash tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The required external tool is not installed or not runnable.
    ///
    /// Fatal precondition failure: probed before any work begins.
    #[error("required tool `{tool}` is not available: {detail}")]
    Unavailable {
        /// The tool binary that was probed.
        tool: String,
        /// Why the probe failed.
        detail: String,
    },

    /// A fetch for one address failed.
    ///
    /// Recoverable: logged and reported, remaining addresses continue.
    #[error("fetch failed for {cid}: {detail}")]
    Fetch {
        /// The address being fetched.
        cid: Cid,
        /// Tool output or error context.
        detail: String,
    },

    /// Address recomputation for a local file failed.
    ///
    /// Recoverable during verification: the address is reported as failed,
    /// remaining addresses continue.
    #[error("hash recomputation failed for {path}: {detail}")]
    Hash {
        /// The local file that was being hashed.
        path: PathBuf,
        /// Tool output or error context.
        detail: String,
    },

    /// An I/O error occurred while driving a tool.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
