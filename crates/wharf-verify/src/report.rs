//! Verification results.

use std::collections::HashMap;

use wharf_types::{Cid, FieldRole, Manifest, ManifestEntry};

/// Integrity status of one unique content address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Recomputed address matches the declared one.
    Ok,
    /// No object present in local storage for this address.
    Missing,
    /// Recomputed address disagrees with the declared one.
    Mismatch,
}

/// Result of one verification run.
///
/// Statuses are keyed by address and held in first-seen manifest order, so
/// output is deterministic regardless of how the run was executed. Every
/// manifest reference to a given address shares that address's single
/// memoized status.
#[derive(Debug, Default)]
pub struct VerifyReport {
    order: Vec<Cid>,
    statuses: HashMap<Cid, VerifyStatus>,
    failed: Vec<(Cid, String)>,
}

/// Counts per status for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VerifySummary {
    /// Addresses whose objects verified clean.
    pub ok: usize,
    /// Addresses with no local object.
    pub missing: usize,
    /// Addresses whose bytes hash to a different address.
    pub mismatch: usize,
    /// Addresses the hash tool failed on.
    pub failed: usize,
}

/// One manifest reference together with its address's status.
#[derive(Debug, Clone, Copy)]
pub struct EntryStatus<'a> {
    /// The manifest entry holding the reference.
    pub entry: &'a ManifestEntry,
    /// Which field referenced the address.
    pub role: FieldRole,
    /// The referenced address.
    pub cid: &'a Cid,
    /// The address's status; `None` when the hash tool failed on it.
    pub status: Option<VerifyStatus>,
}

impl VerifyReport {
    pub(crate) fn record(&mut self, cid: Cid, status: VerifyStatus) {
        self.order.push(cid.clone());
        self.statuses.insert(cid, status);
    }

    pub(crate) fn record_failure(&mut self, cid: Cid, detail: String) {
        self.order.push(cid.clone());
        self.failed.push((cid, detail));
    }

    /// The memoized status of an address, if the hash tool resolved it.
    pub fn status_of(&self, cid: &Cid) -> Option<VerifyStatus> {
        self.statuses.get(cid).copied()
    }

    /// Resolved statuses in first-seen manifest order.
    pub fn statuses(&self) -> impl Iterator<Item = (&Cid, VerifyStatus)> {
        self.order
            .iter()
            .filter_map(|cid| self.statuses.get(cid).map(|s| (cid, *s)))
    }

    /// Addresses the hash tool failed on, with error context.
    pub fn failed(&self) -> &[(Cid, String)] {
        &self.failed
    }

    /// Whether every address verified `Ok` and no tool invocation failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
            && self
                .statuses
                .values()
                .all(|s| matches!(s, VerifyStatus::Ok))
    }

    /// Per-status counts.
    pub fn summary(&self) -> VerifySummary {
        let mut summary = VerifySummary {
            failed: self.failed.len(),
            ..Default::default()
        };
        for status in self.statuses.values() {
            match status {
                VerifyStatus::Ok => summary.ok += 1,
                VerifyStatus::Missing => summary.missing += 1,
                VerifyStatus::Mismatch => summary.mismatch += 1,
            }
        }
        summary
    }

    /// Enumerate every (entry, role) reference in the manifest with the
    /// status of the address it points at.
    ///
    /// Statuses come from the memoized per-address map, so the address was
    /// verified once no matter how many references this yields.
    pub fn per_entry<'a>(&'a self, manifest: &'a Manifest) -> Vec<EntryStatus<'a>> {
        let mut out = Vec::new();
        for entry in &manifest.entries {
            for (role, cid_ref) in &entry.fields {
                out.push(EntryStatus {
                    entry,
                    role: *role,
                    cid: cid_ref.cid(),
                    status: self.status_of(cid_ref.cid()),
                });
            }
        }
        out
    }
}
