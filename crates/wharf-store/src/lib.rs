//! Local backup storage for wharf.
//!
//! [`BackupStore`] owns the on-disk layout of a backup root: one file per
//! content address under `objects/`, a `staging/` area for in-flight fetches,
//! the persisted manifest document and the exported CID list.

mod backup;
mod error;

pub use backup::{BackupStore, CID_LIST_FILE, MANIFEST_FILE};
pub use error::StoreError;
