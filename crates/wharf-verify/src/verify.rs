//! The verification engine.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use wharf_ipfs::{CidHasher, ToolError};
use wharf_store::BackupStore;
use wharf_types::Manifest;

use crate::error::VerifyError;
use crate::report::{VerifyReport, VerifyStatus};

/// Verifies backup integrity against a manifest.
pub struct Verifier {
    store: BackupStore,
    hasher: Arc<dyn CidHasher>,
}

impl Verifier {
    /// Create a verifier over a backup store and a hash tool.
    pub fn new(store: BackupStore, hasher: Arc<dyn CidHasher>) -> Self {
        Self { store, hasher }
    }

    /// The underlying backup store.
    pub fn store(&self) -> &BackupStore {
        &self.store
    }

    /// Verify every unique content address referenced by the manifest.
    ///
    /// Addresses are processed in first-seen manifest order. An absent
    /// object is `Missing`; otherwise the hash tool recomputes the address
    /// from the bytes on disk and the result is `Ok` when the declared
    /// address appears among the recomputed ones, `Mismatch` otherwise.
    ///
    /// Each address is hashed at most once per run; entries sharing an
    /// address share its status through the returned report. A hash tool
    /// failure on one address is recorded in the report and does not stop
    /// the remaining addresses, unless the tool itself has gone away.
    pub async fn verify(&self, manifest: &Manifest) -> Result<VerifyReport, VerifyError> {
        let mut report = VerifyReport::default();

        for cid in manifest.unique_cids() {
            if !self.store.contains(&cid).await? {
                warn!(%cid, "object missing from backup");
                report.record(cid, VerifyStatus::Missing);
                continue;
            }

            let path = self.store.object_path(&cid);
            match self.hasher.recompute(&path).await {
                Ok(recomputed) => {
                    if recomputed.contains(&cid) {
                        debug!(%cid, "verified");
                        report.record(cid, VerifyStatus::Ok);
                    } else {
                        warn!(
                            %cid,
                            recomputed = ?recomputed,
                            "address mismatch, object bytes differ from declared address"
                        );
                        report.record(cid, VerifyStatus::Mismatch);
                    }
                }
                Err(e @ ToolError::Unavailable { .. }) => {
                    // The tool disappeared mid-run; nothing further can be
                    // verified, so bail instead of reporting everything failed.
                    return Err(VerifyError::Tool(e));
                }
                Err(e) => {
                    error!(%cid, error = %e, "hash recomputation failed, continuing");
                    report.record_failure(cid, e.to_string());
                }
            }
        }

        let summary = report.summary();
        info!(
            ok = summary.ok,
            missing = summary.missing,
            mismatch = summary.mismatch,
            failed = summary.failed,
            "verification complete"
        );
        Ok(report)
    }
}
