//! Integration test: failure handling across component boundaries.
//!
//! One bad address must not sink the run, a retry must pick up exactly the
//! leftovers, and an empty selection must fail before anything is written.

use std::sync::Arc;

use tempfile::TempDir;
use wharf_discovery::{discover, DiscoveryError};
use wharf_integration_tests::{record, sample_records, FakeIpfs, MockRecordSource};
use wharf_manifest::{build_manifest, ManifestError};
use wharf_store::BackupStore;
use wharf_sync::BackupSync;
use wharf_types::Cid;
use wharf_verify::{Verifier, VerifyStatus};

#[tokio::test]
async fn test_partial_fetch_failure_is_isolated() {
    let dir = TempDir::new().unwrap();
    let source = MockRecordSource::new(sample_records());
    let records = discover(&source, &["creator-one".to_owned(), "creator-two".to_owned()])
        .await
        .unwrap();
    let manifest = build_manifest(&records).unwrap();

    let tool = Arc::new(FakeIpfs::with_failing_fetches(&["QmB"]));
    let store = BackupStore::open(dir.path()).await.unwrap();
    let report = BackupSync::new(store, tool.clone())
        .sync(&manifest)
        .await
        .unwrap();

    assert_eq!(report.fetched.len(), 2, "QmA and QmC still land");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, Cid::new("QmB"));
    assert!(!report.is_clean());

    // The failed object left nothing behind, staged or installed.
    let store = BackupStore::open(dir.path()).await.unwrap();
    assert!(!store.contains(&Cid::new("QmB")).await.unwrap());
    assert!(store.contains(&Cid::new("QmA")).await.unwrap());
}

#[tokio::test]
async fn test_retry_fetches_only_the_leftovers() {
    let dir = TempDir::new().unwrap();
    let source = MockRecordSource::new(sample_records());
    let records = discover(&source, &["creator-one".to_owned(), "creator-two".to_owned()])
        .await
        .unwrap();
    let manifest = build_manifest(&records).unwrap();

    let failing = Arc::new(FakeIpfs::with_failing_fetches(&["QmB"]));
    let store = BackupStore::open(dir.path()).await.unwrap();
    BackupSync::new(store, failing).sync(&manifest).await.unwrap();

    // Second run with a healthy tool: only the leftover is fetched.
    let healthy = Arc::new(FakeIpfs::new());
    let store = BackupStore::open(dir.path()).await.unwrap();
    let report = BackupSync::new(store, healthy.clone())
        .sync(&manifest)
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.fetched, vec![Cid::new("QmB")]);
    assert_eq!(report.already_present.len(), 2);
    assert_eq!(healthy.fetch_count(), 1);
}

#[tokio::test]
async fn test_empty_discovery_is_fatal() {
    let source = MockRecordSource::new(sample_records());
    let result = discover(&source, &["nobody-home".to_owned()]).await;
    assert!(matches!(result, Err(DiscoveryError::EmptySelection)));
}

#[tokio::test]
async fn test_empty_record_set_never_builds_a_manifest() {
    let result = build_manifest(&[]);
    assert!(matches!(result, Err(ManifestError::EmptySelection)));
}

#[tokio::test]
async fn test_verify_reports_unsynced_objects_missing() {
    let dir = TempDir::new().unwrap();
    let records = vec![
        record("synced", Some("QmA"), None),
        record("never-synced", Some("QmZ"), None),
    ];
    let manifest = build_manifest(&records).unwrap();

    // Only QmA makes it into the backup.
    let tool = Arc::new(FakeIpfs::with_failing_fetches(&["QmZ"]));
    let store = BackupStore::open(dir.path()).await.unwrap();
    BackupSync::new(store, tool.clone()).sync(&manifest).await.unwrap();

    let store = BackupStore::open(dir.path()).await.unwrap();
    let report = Verifier::new(store, tool).verify(&manifest).await.unwrap();

    assert_eq!(report.status_of(&Cid::new("QmA")), Some(VerifyStatus::Ok));
    assert_eq!(
        report.status_of(&Cid::new("QmZ")),
        Some(VerifyStatus::Missing)
    );
    assert!(!report.is_clean());
}
