//! `ipfs` CLI adapter.

use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::{debug, warn};
use wharf_types::Cid;

use crate::error::ToolError;
use crate::traits::{CidHasher, ObjectFetcher};

/// Adapter driving a locally installed `ipfs` binary.
///
/// Fetches with `ipfs get <cid> -o <dest>`, recomputes addresses with
/// `ipfs add --only-hash --quiet -r <path>` (no data is added to the local
/// node; the command only reports what the address would be).
pub struct IpfsCli {
    binary: PathBuf,
}

impl Default for IpfsCli {
    fn default() -> Self {
        Self::new("ipfs")
    }
}

impl IpfsCli {
    /// Create an adapter for the given binary name or path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Probe the tool by running `ipfs version`.
    ///
    /// Call this before starting a sync or verify run: a missing tool is a
    /// fatal precondition, not something to discover halfway through.
    pub async fn check_available(&self) -> Result<(), ToolError> {
        let output = Command::new(&self.binary)
            .arg("version")
            .output()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;
        if !output.status.success() {
            return Err(self.unavailable(format!(
                "`version` exited with {}: {}",
                output.status,
                stderr_excerpt(&output)
            )));
        }
        debug!(
            binary = %self.binary.display(),
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "ipfs tool available"
        );
        Ok(())
    }

    fn unavailable(&self, detail: String) -> ToolError {
        ToolError::Unavailable {
            tool: self.binary.display().to_string(),
            detail,
        }
    }
}

#[async_trait::async_trait]
impl ObjectFetcher for IpfsCli {
    async fn fetch(&self, cid: &Cid, dest: &Path) -> Result<(), ToolError> {
        let output = Command::new(&self.binary)
            .arg("get")
            .arg(cid.as_str())
            .arg("-o")
            .arg(dest)
            .output()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !output.status.success() {
            // Drop whatever the tool left at dest so a failed fetch never
            // leaves partial bytes for the caller to install.
            if let Err(e) = tokio::fs::remove_file(dest).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(%cid, %e, "could not remove partial fetch output");
                }
            }
            return Err(ToolError::Fetch {
                cid: cid.clone(),
                detail: stderr_excerpt(&output),
            });
        }

        debug!(%cid, dest = %dest.display(), "object fetched");
        Ok(())
    }
}

#[async_trait::async_trait]
impl CidHasher for IpfsCli {
    async fn recompute(&self, path: &Path) -> Result<Vec<Cid>, ToolError> {
        let output = Command::new(&self.binary)
            .arg("add")
            .arg("--only-hash")
            .arg("--quiet")
            .arg("-r")
            .arg(path)
            .output()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(ToolError::Hash {
                path: path.to_path_buf(),
                detail: stderr_excerpt(&output),
            });
        }

        let cids: Vec<Cid> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Cid::new)
            .collect();

        if cids.is_empty() {
            return Err(ToolError::Hash {
                path: path.to_path_buf(),
                detail: "tool reported no addresses".to_owned(),
            });
        }

        debug!(path = %path.display(), count = cids.len(), "addresses recomputed");
        Ok(cids)
    }
}

/// First stderr line of a failed invocation, for error context.
fn stderr_excerpt(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .next()
        .unwrap_or("no tool output")
        .to_owned()
}
