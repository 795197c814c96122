//! Backup synchronization.
//!
//! [`BackupSync`] walks a manifest and makes sure every referenced content
//! address has an object in local storage, fetching each unique address at
//! most once per run and skipping objects that are already present.

mod error;
mod sync;

pub use error::SyncError;
pub use sync::{BackupSync, SyncReport};
