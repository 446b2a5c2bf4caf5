//! File-backed and in-memory storage behaviour: restart survival, merge
//! semantics, concurrent writers, legacy import, history.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use test_fixtures::fixture_path;
use triage_core::models::{KnowledgeEntry, PredictionHistoryRecord, PredictionRecord};
use triage_core::traits::{IHistorySink, IKnowledgeCache};
use triage_storage::pool::pragmas::verify_wal_mode;
use triage_storage::StorageEngine;

fn entry(description: &str) -> KnowledgeEntry {
    KnowledgeEntry::from_static(description, &["Rest and drink plenty of fluids daily."])
}

fn history(identity: &str, nonce: &str, minutes_ago: i64) -> PredictionHistoryRecord {
    PredictionHistoryRecord {
        identity: Some(identity.to_string()),
        symptoms: vec!["chills".into(), "headache".into()],
        ranked_diseases: vec!["Malaria".into()],
        results: vec![PredictionRecord {
            disease: "Malaria".into(),
            confidence: 60.0,
            description: "desc".into(),
            precautions: vec!["p".into()],
        }],
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        nonce: nonce.to_string(),
    }
}

#[test]
fn entries_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("triage.db");
    {
        let storage = StorageEngine::open(&path).unwrap();
        storage.put("Malaria", &entry("Malaria is a disease.")).unwrap();
    }
    let reopened = StorageEngine::open(&path).unwrap();
    assert_eq!(
        reopened.get("Malaria").unwrap(),
        Some(entry("Malaria is a disease."))
    );
    assert_eq!(reopened.entry_count().unwrap(), 1);
}

#[test]
fn file_database_uses_wal() {
    let dir = TempDir::new().unwrap();
    let storage = StorageEngine::open(&dir.path().join("wal.db")).unwrap();
    let wal = storage
        .pool()
        .writer
        .with_conn_sync(verify_wal_mode)
        .unwrap();
    assert!(wal);
}

#[test]
fn put_keeps_unrelated_labels() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.put("Malaria", &entry("one")).unwrap();
    storage.put("Migraine", &entry("two")).unwrap();
    storage.put("Malaria", &entry("three")).unwrap();

    assert_eq!(storage.entry_count().unwrap(), 2);
    assert_eq!(storage.get("Migraine").unwrap(), Some(entry("two")));
    assert_eq!(storage.get("Malaria").unwrap(), Some(entry("three")));
}

#[test]
fn missing_label_is_none() {
    let storage = StorageEngine::open_in_memory().unwrap();
    assert_eq!(storage.get("Unknown").unwrap(), None);
}

#[test]
fn concurrent_puts_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(StorageEngine::open(&dir.path().join("c.db")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let storage = Arc::clone(&storage);
            thread::spawn(move || {
                storage
                    .put(&format!("Condition {i}"), &entry(&format!("desc {i}")))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(storage.entry_count().unwrap(), 8);
    for i in 0..8 {
        assert!(storage.get(&format!("Condition {i}")).unwrap().is_some());
    }
}

#[test]
fn legacy_import_merges_without_overwriting() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.put("Malaria", &entry("already cached")).unwrap();

    let inserted = storage
        .import_legacy_json(&fixture_path("artifacts/legacy_cache.json"))
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(storage.entry_count().unwrap(), 2);
    assert_eq!(
        storage.get("Malaria").unwrap().unwrap().description,
        "already cached"
    );
    let migraine = storage.get("Migraine").unwrap().unwrap();
    assert_eq!(migraine.precautions.len(), 1);
}

#[test]
fn legacy_import_skips_entries_outside_precaution_bounds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    let seven: Vec<String> = (0..7).map(|i| format!("Precaution number {i}.")).collect();
    let legacy = serde_json::json!({
        "Malaria": { "description": "Malaria.", "precautions": [] },
        "Common Cold": { "description": "Cold.", "precautions": seven },
        "Typhoid": { "description": "Typhoid.", "precautions": ["Drink boiled water."] },
    });
    std::fs::write(&path, legacy.to_string()).unwrap();

    let storage = StorageEngine::open_in_memory().unwrap();
    let inserted = storage.import_legacy_json(&path).unwrap();

    assert_eq!(inserted, 1);
    assert!(storage.get("Malaria").unwrap().is_none());
    assert!(storage.get("Common Cold").unwrap().is_none());
    assert!(storage.get("Typhoid").unwrap().unwrap().is_well_formed());
}

#[test]
fn legacy_import_missing_file_is_io_error() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let err = storage
        .import_legacy_json(std::path::Path::new("/no/such/cache.json"))
        .unwrap_err();
    assert!(err.to_string().contains("cache.json"));
}

#[test]
fn history_returns_newest_first_per_identity() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.record(&history("user-a", "n1", 10)).unwrap();
    storage.record(&history("user-a", "n2", 1)).unwrap();
    storage.record(&history("user-b", "n3", 0)).unwrap();

    let recent = storage.recent_history("user-a", 10).unwrap();
    let nonces: Vec<_> = recent.iter().map(|r| r.nonce.as_str()).collect();
    assert_eq!(nonces, vec!["n2", "n1"]);
    assert_eq!(recent[0].results[0].disease, "Malaria");

    assert_eq!(storage.recent_history("user-a", 1).unwrap().len(), 1);
}

#[test]
fn duplicate_nonce_is_rejected() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.record(&history("user-a", "same", 0)).unwrap();
    assert!(storage.record(&history("user-a", "same", 0)).is_err());
}
