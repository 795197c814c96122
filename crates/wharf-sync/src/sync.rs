//! The backup synchronizer.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use wharf_ipfs::ObjectFetcher;
use wharf_store::BackupStore;
use wharf_types::{Cid, Manifest};

use crate::error::SyncError;

/// Outcome of one sync run.
///
/// Addresses appear in first-seen manifest order, so the report is
/// reproducible for the same manifest and storage state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Addresses fetched into the backup during this run.
    pub fetched: Vec<Cid>,
    /// Addresses whose objects were already present; not refetched.
    pub already_present: Vec<Cid>,
    /// Addresses whose fetch failed, with error context for a narrow retry.
    pub failed: Vec<(Cid, String)>,
}

impl SyncReport {
    /// Unique addresses processed in this run.
    pub fn total(&self) -> usize {
        self.fetched.len() + self.already_present.len() + self.failed.len()
    }

    /// Whether every address ended up present in the backup.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Synchronizes a local backup against a manifest.
///
/// Best-effort semantics: one address failing to fetch never aborts the
/// remaining addresses.
pub struct BackupSync {
    store: BackupStore,
    fetcher: Arc<dyn ObjectFetcher>,
}

impl BackupSync {
    /// Create a synchronizer over a backup store and a fetch tool.
    pub fn new(store: BackupStore, fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// The underlying backup store.
    pub fn store(&self) -> &BackupStore {
        &self.store
    }

    /// Ensure every content address referenced by the manifest has an object
    /// in local storage.
    ///
    /// Entries are streamed in manifest order; a run-scoped seen set
    /// guarantees each unique address is processed at most once no matter how
    /// many entries reference it. Fetches land in the staging area and are
    /// renamed into `objects/` only when complete, so a crash or failure
    /// never leaves a partially visible object.
    pub async fn sync(&self, manifest: &Manifest) -> Result<SyncReport, SyncError> {
        let mut seen: HashSet<Cid> = HashSet::new();
        let mut report = SyncReport::default();

        for entry in &manifest.entries {
            info!(entry = %entry.name, refs = entry.fields.len(), "syncing entry");

            for cid_ref in entry.fields.values() {
                let cid = cid_ref.cid();
                if !seen.insert(cid.clone()) {
                    continue;
                }

                if self.store.contains(cid).await? {
                    debug!(%cid, "already backed up, skipping");
                    report.already_present.push(cid.clone());
                    continue;
                }

                let staged = self.store.staging_path(cid);
                match self.fetcher.fetch(cid, &staged).await {
                    Ok(()) => {
                        self.store.install(cid).await?;
                        info!(%cid, "fetched");
                        report.fetched.push(cid.clone());
                    }
                    Err(e) => {
                        warn!(%cid, error = %e, "fetch failed, continuing");
                        self.store.discard_staged(cid).await?;
                        report.failed.push((cid.clone(), e.to_string()));
                    }
                }
            }
        }

        info!(
            fetched = report.fetched.len(),
            already_present = report.already_present.len(),
            failed = report.failed.len(),
            "sync complete"
        );
        Ok(report)
    }
}
