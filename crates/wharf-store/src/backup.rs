//! Backup root layout and object placement.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use wharf_types::Cid;

use crate::error::StoreError;

/// Directory holding one file per fetched object, named by content address.
const OBJECTS_DIR: &str = "objects";

/// Directory holding in-flight fetches before they are installed.
const STAGING_DIR: &str = "staging";

/// File name of the persisted manifest, relative to the backup root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name of the exported CID list, relative to the backup root.
pub const CID_LIST_FILE: &str = "cids.txt";

/// A backup root on local disk.
///
/// Layout:
///
/// ```text
/// {root}/manifest.json     persisted manifest
/// {root}/cids.txt          exported address list
/// {root}/objects/{cid}     one object per content address
/// {root}/staging/{cid}     in-flight fetch targets
/// ```
///
/// Objects become visible under `objects/` only via [`BackupStore::install`],
/// a same-filesystem rename of the staged file. A reader therefore never
/// observes a partially written object: it is either fully present or absent.
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    /// Open a backup root, creating the directory structure if needed.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(OBJECTS_DIR)).await?;
        fs::create_dir_all(root.join(STAGING_DIR)).await?;
        info!(root = %root.display(), "backup root opened");
        Ok(Self { root })
    }

    /// The backup root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the object stored for a content address.
    pub fn object_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(OBJECTS_DIR).join(cid.as_str())
    }

    /// Staging path a fetch for this address should write to.
    pub fn staging_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(STAGING_DIR).join(cid.as_str())
    }

    /// Path of the persisted manifest document.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Path of the exported CID list.
    pub fn cid_list_path(&self) -> PathBuf {
        self.root.join(CID_LIST_FILE)
    }

    /// Whether an object for this address is present in the backup.
    pub async fn contains(&self, cid: &Cid) -> Result<bool, StoreError> {
        match fs::metadata(self.object_path(cid)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Publish a staged object under `objects/` by renaming it into place.
    ///
    /// The rename stays on one filesystem, so the object is visible either
    /// completely or not at all.
    pub async fn install(&self, cid: &Cid) -> Result<(), StoreError> {
        let staged = self.staging_path(cid);
        let target = self.object_path(cid);
        match fs::rename(&staged, &target).await {
            Ok(()) => {
                debug!(%cid, path = %target.display(), "object installed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotStaged(cid.clone()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Remove a staged object left behind by a failed fetch, if any.
    pub async fn discard_staged(&self, cid: &Cid) -> Result<(), StoreError> {
        match fs::remove_file(self.staging_path(cid)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Write the newline-delimited CID list to its fixed location.
    ///
    /// Returns the path written. The write goes through a temporary file and
    /// a rename, matching the manifest's atomicity.
    pub async fn write_cid_list(&self, cids: &[Cid]) -> Result<PathBuf, StoreError> {
        let path = self.cid_list_path();
        let mut doc = String::new();
        for cid in cids {
            doc.push_str(cid.as_str());
            doc.push('\n');
        }

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, doc.as_bytes()).await?;
        fs::rename(&tmp_path, &path).await?;

        info!(path = %path.display(), count = cids.len(), "CID list written");
        Ok(path)
    }
}
