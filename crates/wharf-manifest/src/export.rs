//! CID list export.

use wharf_types::{Cid, Manifest};

/// The unique content addresses of a manifest, in first-seen order.
///
/// Pure projection: each address appears exactly once, ordered by its first
/// occurrence across entries. Writing the list to disk is an I/O concern of
/// the caller (see `BackupStore::write_cid_list`).
pub fn export_cids(manifest: &Manifest) -> Vec<Cid> {
    manifest.unique_cids()
}

/// Render an address list as newline-delimited plain text, one address per
/// line, with a trailing newline.
pub fn format_cid_list(cids: &[Cid]) -> String {
    let mut out = String::new();
    for cid in cids {
        out.push_str(cid.as_str());
        out.push('\n');
    }
    out
}
