//! Manifest persistence.
//!
//! The manifest is written as pretty-printed JSON so it stays inspectable
//! and diffable by hand. Loading is the exact inverse: entry order, role
//! keys and URI strings round-trip unchanged. Unknown extra fields in the
//! document are tolerated on load, so older builds can read manifests
//! written by newer ones.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use wharf_types::Manifest;

use crate::error::ManifestError;

/// Serialize a manifest to `path` as pretty JSON.
///
/// The document is written to a temporary file next to the target and
/// renamed into place, so a crash mid-write never leaves a truncated
/// manifest behind.
pub fn save_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let mut doc = serde_json::to_vec_pretty(manifest)?;
    doc.push(b'\n');

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &doc)?;
    fs::rename(&tmp_path, path)?;

    info!(path = %path.display(), entries = manifest.len(), "manifest saved");
    Ok(())
}

/// Load a manifest previously written by [`save_manifest`].
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let doc = fs::read(path)?;
    let manifest: Manifest = serde_json::from_slice(&doc)?;
    debug!(path = %path.display(), entries = manifest.len(), "manifest loaded");
    Ok(manifest)
}
