//! Integration test: the full backup pipeline.
//!
//! Drives discovery, manifest build, save/load, sync, verify and export over
//! a temp backup root with mock tools, and checks the cross-component
//! invariants: dedup, idempotency, round-trip and export order.

use std::sync::Arc;

use tempfile::TempDir;
use wharf_discovery::discover;
use wharf_integration_tests::{sample_records, FakeIpfs, MockRecordSource};
use wharf_manifest::{build_manifest, export_cids, load_manifest, save_manifest};
use wharf_store::BackupStore;
use wharf_sync::BackupSync;
use wharf_types::Cid;
use wharf_verify::Verifier;

fn creators() -> Vec<String> {
    vec!["creator-one".to_owned(), "creator-two".to_owned()]
}

#[tokio::test]
async fn test_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let source = MockRecordSource::new(sample_records());

    // Discover and build.
    let records = discover(&source, &creators()).await.unwrap();
    assert_eq!(records.len(), 4);
    let manifest = build_manifest(&records).unwrap();
    assert_eq!(manifest.len(), 4, "every record becomes an entry");

    // The gateway-URL record contributes an entry but no references.
    assert!(manifest.entries[2].fields.is_empty());

    // Persist and reload: verification runs on the loaded copy only.
    let store = BackupStore::open(dir.path()).await.unwrap();
    save_manifest(&manifest, &store.manifest_path()).unwrap();
    let loaded = load_manifest(&store.manifest_path()).unwrap();
    assert_eq!(loaded, manifest);

    // Sync: QmA and QmB are referenced twice but fetched once each.
    let tool = Arc::new(FakeIpfs::new());
    let sync = BackupSync::new(store, tool.clone());
    let report = sync.sync(&loaded).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(report.fetched.len(), 3);
    assert_eq!(tool.fetch_count(), 3, "unique addresses only");

    // Verify the synced backup.
    let store = BackupStore::open(dir.path()).await.unwrap();
    let verifier = Verifier::new(store, tool.clone());
    let verify_report = verifier.verify(&loaded).await.unwrap();
    assert!(verify_report.is_clean());
    assert_eq!(tool.hash_count(), 3, "each address hashed once");

    // Export.
    let cids = export_cids(&loaded);
    let names: Vec<&str> = cids.iter().map(Cid::as_str).collect();
    assert_eq!(names, ["QmA", "QmB", "QmC"], "first-seen order, no dupes");

    let store = BackupStore::open(dir.path()).await.unwrap();
    let path = store.write_cid_list(&cids).await.unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text, "QmA\nQmB\nQmC\n");
}

#[tokio::test]
async fn test_second_sync_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let source = MockRecordSource::new(sample_records());
    let records = discover(&source, &creators()).await.unwrap();
    let manifest = build_manifest(&records).unwrap();

    let tool = Arc::new(FakeIpfs::new());
    {
        let store = BackupStore::open(dir.path()).await.unwrap();
        let report = BackupSync::new(store, tool.clone())
            .sync(&manifest)
            .await
            .unwrap();
        assert_eq!(report.fetched.len(), 3);
    }
    {
        let store = BackupStore::open(dir.path()).await.unwrap();
        let report = BackupSync::new(store, tool.clone())
            .sync(&manifest)
            .await
            .unwrap();
        assert!(report.fetched.is_empty(), "nothing left to fetch");
        assert_eq!(report.already_present.len(), 3);
    }
    assert_eq!(tool.fetch_count(), 3, "second run fetched nothing");
}

#[tokio::test]
async fn test_tamper_detection_after_backup() {
    let dir = TempDir::new().unwrap();
    let source = MockRecordSource::new(sample_records());
    let records = discover(&source, &creators()).await.unwrap();
    let manifest = build_manifest(&records).unwrap();

    let tool = Arc::new(FakeIpfs::new());
    let store = BackupStore::open(dir.path()).await.unwrap();
    BackupSync::new(store, tool.clone())
        .sync(&manifest)
        .await
        .unwrap();

    // Tamper with one object; delete another.
    let store = BackupStore::open(dir.path()).await.unwrap();
    std::fs::write(store.object_path(&Cid::new("QmB")), "object:FLIPPED").unwrap();
    std::fs::remove_file(store.object_path(&Cid::new("QmC"))).unwrap();

    let report = Verifier::new(store, tool).verify(&manifest).await.unwrap();
    let summary = report.summary();
    assert_eq!(summary.ok, 1, "untouched QmA stays ok");
    assert_eq!(summary.mismatch, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(
        report.status_of(&Cid::new("QmB")),
        Some(wharf_verify::VerifyStatus::Mismatch)
    );
    assert_eq!(
        report.status_of(&Cid::new("QmC")),
        Some(wharf_verify::VerifyStatus::Missing)
    );
}

#[tokio::test]
async fn test_manifest_roundtrip_preserves_uri_paths() {
    let dir = TempDir::new().unwrap();
    let records = vec![wharf_types::RawRecord {
        name: "pathy".into(),
        category: "interactive".into(),
        artifact_uri: Some("ipfs://QmRoot/index.html".into()),
        ..Default::default()
    }];
    let manifest = build_manifest(&records).unwrap();

    let path = dir.path().join("manifest.json");
    save_manifest(&manifest, &path).unwrap();
    let loaded = load_manifest(&path).unwrap();

    let entry = &loaded.entries[0];
    let cid_ref = entry.fields.get(&wharf_types::FieldRole::Artifact).unwrap();
    assert_eq!(cid_ref.uri(), "ipfs://QmRoot/index.html");
    assert_eq!(cid_ref.cid().as_str(), "QmRoot");
}
