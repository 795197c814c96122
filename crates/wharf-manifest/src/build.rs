//! Manifest construction from raw records.

use tracing::{debug, info};
use wharf_types::{Manifest, ManifestEntry, RawRecord};

use crate::error::ManifestError;
use crate::extract::extract_refs;

/// Build a manifest from records, preserving input order.
///
/// Every record becomes exactly one entry, even when it contributes zero
/// content-address references; an entry with no fields still represents a
/// discovered token. Records are never merged or deduplicated here; address
/// deduplication happens at the point of consumption (sync, verify, export).
///
/// Returns [`ManifestError::EmptySelection`] for an empty record slice so a
/// run that matched nothing fails loudly instead of persisting an empty but
/// valid-looking manifest.
pub fn build_manifest(records: &[RawRecord]) -> Result<Manifest, ManifestError> {
    if records.is_empty() {
        return Err(ManifestError::EmptySelection);
    }

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let fields = extract_refs(record);
        debug!(name = %record.name, refs = fields.len(), "adding manifest entry");
        entries.push(ManifestEntry {
            name: record.name.clone(),
            category: record.category.clone(),
            fields,
        });
    }

    let manifest = Manifest { entries };
    info!(
        entries = manifest.len(),
        unique_addresses = manifest.unique_cids().len(),
        "manifest built"
    );
    Ok(manifest)
}
