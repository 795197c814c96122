//! Shared test harness for wharf integration tests.
//!
//! Provides a mock record source, a fake ipfs tool pair ([`FakeIpfs`])
//! whose fetch/hash halves agree on a content convention, and record
//! fixtures, so the full discover/build/sync/verify/export pipeline runs
//! against a temp directory with no network and no real ipfs binary.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use wharf_discovery::{DiscoveryError, RecordSource};
use wharf_ipfs::{CidHasher, ObjectFetcher, ToolError};
use wharf_types::{Cid, RawRecord};

// =========================================================================
// Mock record source
// =========================================================================

/// In-memory record source serving fixed records per filter, in pages.
pub struct MockRecordSource {
    by_filter: HashMap<String, Vec<RawRecord>>,
    page_size: usize,
}

impl MockRecordSource {
    /// Source serving the given records, two per page.
    pub fn new(by_filter: HashMap<String, Vec<RawRecord>>) -> Self {
        Self {
            by_filter,
            page_size: 2,
        }
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn page(&self, filter: &str, cursor: u64) -> Result<Vec<RawRecord>, DiscoveryError> {
        let all = self.by_filter.get(filter).cloned().unwrap_or_default();
        let start = (cursor as usize) * self.page_size;
        Ok(all.into_iter().skip(start).take(self.page_size).collect())
    }
}

// =========================================================================
// Fake ipfs tool
// =========================================================================

/// Fake fetch+hash tool pair sharing one content convention: fetching a cid
/// writes `object:<cid>`, hashing a file recovers the cid from that prefix.
///
/// Tampering with an object file on disk therefore produces a different
/// recomputed address, exactly like flipping bytes under a real hash.
/// Fetches can be forced to fail per address for failure-path tests.
pub struct FakeIpfs {
    fetch_calls: Mutex<Vec<Cid>>,
    hash_calls: Mutex<Vec<Cid>>,
    failing_fetches: Vec<Cid>,
}

impl FakeIpfs {
    pub fn new() -> Self {
        Self {
            fetch_calls: Mutex::new(Vec::new()),
            hash_calls: Mutex::new(Vec::new()),
            failing_fetches: Vec::new(),
        }
    }

    /// A tool whose fetches fail for the given addresses.
    pub fn with_failing_fetches(cids: &[&str]) -> Self {
        Self {
            failing_fetches: cids.iter().map(|c| Cid::new(*c)).collect(),
            ..Self::new()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().unwrap().len()
    }

    pub fn hash_count(&self) -> usize {
        self.hash_calls.lock().unwrap().len()
    }
}

impl Default for FakeIpfs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectFetcher for FakeIpfs {
    async fn fetch(&self, cid: &Cid, dest: &Path) -> Result<(), ToolError> {
        self.fetch_calls.lock().unwrap().push(cid.clone());
        if self.failing_fetches.contains(cid) {
            return Err(ToolError::Fetch {
                cid: cid.clone(),
                detail: "simulated fetch failure".to_owned(),
            });
        }
        tokio::fs::write(dest, format!("object:{cid}")).await?;
        Ok(())
    }
}

#[async_trait]
impl CidHasher for FakeIpfs {
    async fn recompute(&self, path: &Path) -> Result<Vec<Cid>, ToolError> {
        let content = tokio::fs::read_to_string(path).await?;
        let cid = content.strip_prefix("object:").unwrap_or("CORRUPT");
        self.hash_calls.lock().unwrap().push(Cid::new(cid));
        Ok(vec![Cid::new(cid)])
    }
}

// =========================================================================
// Record fixtures
// =========================================================================

/// A record whose artifact/display/thumbnail fields reference the given
/// addresses (any of them may be `None`).
pub fn record(name: &str, artifact: Option<&str>, display: Option<&str>) -> RawRecord {
    RawRecord {
        name: name.into(),
        category: "image".into(),
        artifact_uri: artifact.map(|c| format!("ipfs://{c}")),
        display_uri: display.map(|c| format!("ipfs://{c}")),
        ..Default::default()
    }
}

/// Two creators' worth of records with overlapping addresses, including a
/// gateway URL (dropped at extraction) and a record with no content URIs.
pub fn sample_records() -> HashMap<String, Vec<RawRecord>> {
    HashMap::from([
        (
            "creator-one".to_owned(),
            vec![
                record("piece-1", Some("QmA"), Some("QmB")),
                record("piece-2", Some("QmA"), None),
                RawRecord {
                    name: "piece-3".into(),
                    category: "image".into(),
                    artifact_uri: Some("https://gateway.example/ipfs/QmX".into()),
                    ..Default::default()
                },
            ],
        ),
        (
            "creator-two".to_owned(),
            vec![record("piece-4", Some("QmC"), Some("QmB"))],
        ),
    ])
}
