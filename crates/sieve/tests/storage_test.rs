//! Integration tests for versioned insight snapshots.

use serde_json::json;
use tempfile::TempDir;

use sieve::storage::fingerprint;
use sieve::{CandidateInsight, InsightSnapshot, SnapshotStore, StatisticsSnapshot, validate};

fn stats() -> StatisticsSnapshot {
    serde_json::from_value(json!({
        "decision_metric": "revenue",
        "top_factors": [
            {"factor": "marketing_spend", "impact_score": 85.5, "type": "numeric", "abs_correlation": 0.855}
        ]
    }))
    .expect("valid statistics")
}

fn columns() -> Vec<String> {
    vec!["marketing_spend".to_string(), "revenue".to_string()]
}

/// Build a snapshot from a freshly validated list.
fn create_snapshot(dataset: &str) -> InsightSnapshot {
    let stats = stats();
    let columns = columns();
    let insights = validate(
        &[CandidateInsight::new("marketing_spend", "Spend drives revenue")],
        &stats,
        &columns,
    );
    InsightSnapshot::new(dataset, stats, columns, insights).expect("snapshot")
}

// =============================================================================
// Save / Load
// =============================================================================

#[test]
fn test_save_assigns_incrementing_versions() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("insights"));

    let first = store.save(create_snapshot("sales.csv")).unwrap();
    let second = store.save(create_snapshot("sales.csv")).unwrap();

    assert_eq!(first.version, 1);
    assert_eq!(second.version, 2);
    assert_eq!(store.versions("sales.csv", "revenue").unwrap(), vec![1, 2]);
    assert!(dir.path().join("insights/sales.csv_revenue_v2.json").exists());
    assert!(dir.path().join("insights/sales.csv_revenue_latest.json").exists());
    assert!(!dir.path().join("insights/sales.csv_revenue_latest.json.tmp").exists());
}

#[test]
fn test_load_latest_and_specific_version() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());

    let saved = store.save(create_snapshot("sales.csv")).unwrap();
    store.save(create_snapshot("sales.csv")).unwrap();

    let latest = store.load("sales.csv", "revenue", None).unwrap().unwrap();
    assert_eq!(latest.version, 2);

    let v1 = store.load("sales.csv", "revenue", Some(1)).unwrap().unwrap();
    assert_eq!(v1, saved);
    assert_eq!(v1.insights[0].factor(), "marketing_spend");

    assert!(store.load("sales.csv", "revenue", Some(7)).unwrap().is_none());
    assert!(store.load("other.csv", "revenue", None).unwrap().is_none());
}

#[test]
fn test_datasets_with_separators_are_flattened() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());

    store.save(create_snapshot("team/q3\\sales.csv")).unwrap();

    assert!(dir.path().join("team_q3_sales.csv_revenue_v1.json").exists());
    let loaded = store.load("team/q3\\sales.csv", "revenue", None).unwrap().unwrap();
    assert_eq!(loaded.dataset_id, "team/q3\\sales.csv");
}

#[test]
fn test_corrupt_snapshot_is_persistence_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sales.csv_revenue_latest.json"), "{not json").unwrap();
    let store = SnapshotStore::new(dir.path());

    let err = store.load("sales.csv", "revenue", None).unwrap_err();
    assert!(matches!(err, sieve::SieveError::Persistence(_)));
}

#[test]
fn test_colliding_keys_are_refused() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(create_snapshot("a_b")).unwrap();

    // ("a", "b_revenue") flattens to the same `a_b_revenue` file names.
    let mut stats = stats();
    stats.decision_metric = "b_revenue".to_string();
    let other = InsightSnapshot::new("a", stats, columns(), Vec::new()).unwrap();

    let err = store.save(other).unwrap_err();
    assert!(matches!(err, sieve::SieveError::Persistence(_)));
    assert!(store.load("a", "b_revenue", None).is_err());
    assert_eq!(store.versions("a_b", "revenue").unwrap(), vec![1]);
    assert_eq!(store.load("a_b", "revenue", None).unwrap().unwrap().dataset_id, "a_b");
}

// =============================================================================
// Write Failures
// =============================================================================

#[cfg(target_os = "linux")]
#[test]
fn test_failed_latest_write_rolls_back_version() {
    let dir = TempDir::new().unwrap();
    // Every write to the latest copy's staging file hits a full device.
    std::os::unix::fs::symlink("/dev/full", dir.path().join("sales.csv_revenue_latest.json.tmp"))
        .unwrap();
    let store = SnapshotStore::new(dir.path());

    let err = store.save(create_snapshot("sales.csv")).unwrap_err();
    assert!(matches!(err, sieve::SieveError::Persistence(_)));
    assert!(store.versions("sales.csv", "revenue").unwrap().is_empty());
    assert!(!dir.path().join("sales.csv_revenue_latest.json").exists());
    assert!(!dir.path().join("sales.csv_revenue_v1.json").exists());
}

#[cfg(unix)]
#[test]
fn test_save_replaces_latest_link_instead_of_writing_through() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("elsewhere.json");
    let store = SnapshotStore::new(dir.path());
    store.save(create_snapshot("sales.csv")).unwrap();

    let latest = dir.path().join("sales.csv_revenue_latest.json");
    std::fs::copy(&latest, &target).unwrap();
    std::fs::remove_file(&latest).unwrap();
    std::os::unix::fs::symlink(&target, &latest).unwrap();

    let saved = store.save(create_snapshot("sales.csv")).unwrap();
    assert_eq!(saved.version, 2);
    assert!(!std::fs::symlink_metadata(&latest).unwrap().file_type().is_symlink());
    let linked: InsightSnapshot =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(linked.version, 1);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_single_version() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(create_snapshot("sales.csv")).unwrap();
    store.save(create_snapshot("sales.csv")).unwrap();

    assert!(store.delete("sales.csv", "revenue", Some(1)).unwrap());
    assert!(!store.delete("sales.csv", "revenue", Some(1)).unwrap());
    assert_eq!(store.versions("sales.csv", "revenue").unwrap(), vec![2]);

    // Next save continues after the highest remaining version.
    let next = store.save(create_snapshot("sales.csv")).unwrap();
    assert_eq!(next.version, 3);
}

#[test]
fn test_delete_all_counts_latest() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(create_snapshot("sales.csv")).unwrap();
    store.save(create_snapshot("sales.csv")).unwrap();
    store.save(create_snapshot("other.csv")).unwrap();

    assert_eq!(store.delete_all("sales.csv", "revenue").unwrap(), 3);
    assert!(store.versions("sales.csv", "revenue").unwrap().is_empty());
    assert_eq!(store.versions("other.csv", "revenue").unwrap(), vec![1]);
}

// =============================================================================
// Staleness
// =============================================================================

#[test]
fn test_stale_when_statistics_change() {
    let snapshot = create_snapshot("sales.csv");
    assert!(!snapshot.is_stale(&stats(), &columns()).unwrap());

    let mut changed = stats();
    changed.top_factors[0].impact_score = Some(80.0);
    assert!(snapshot.is_stale(&changed, &columns()).unwrap());
    assert_ne!(snapshot.fingerprint, fingerprint(&changed, &columns()).unwrap());
}
