//! Traits abstracting the external content-addressing tools.

use std::path::Path;

use wharf_types::Cid;

use crate::error::ToolError;

/// Retrieves content-addressed objects into local files.
///
/// Implementations must write the complete object to `dest` before
/// returning `Ok`, and must not leave a file at `dest` on failure. The
/// caller publishes `dest` into the backup afterwards, so a half-written
/// file here would otherwise become a half-written object.
#[async_trait::async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Fetch the object for `cid` into the file at `dest`.
    async fn fetch(&self, cid: &Cid, dest: &Path) -> Result<(), ToolError>;
}

/// Recomputes content addresses from local bytes.
#[async_trait::async_trait]
pub trait CidHasher: Send + Sync {
    /// Recompute the content address(es) for the file at `path`.
    ///
    /// A tool may report several addresses for one input (per-file lines of
    /// a recursive add, alternative address forms). Verification treats a
    /// match against any of them as a match.
    async fn recompute(&self, path: &Path) -> Result<Vec<Cid>, ToolError>;
}
