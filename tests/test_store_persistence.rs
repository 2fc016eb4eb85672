// ABOUTME: Tests for the file-per-record session store
// Verifies write-once creation, live-token lookup, idempotent removal, and expiry sweep

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tmux_relay::config::RelayConfig;
use tmux_relay::models::SessionRecord;
use tmux_relay::store::{FileSessionStore, SessionStore, StoreError};
use uuid::Uuid;

fn store_in(dir: &TempDir) -> FileSessionStore {
    let config = RelayConfig::with_storage_dir(dir.path());
    FileSessionStore::new(&config).unwrap()
}

fn record(token: &str, target: &str) -> SessionRecord {
    SessionRecord::new(
        token.to_string(),
        "telegram".to_string(),
        Some(target.to_string()),
        Some("demo-project".to_string()),
        Some(serde_json::json!({"origin": "build-finished"})),
    )
}

#[test]
fn test_create_then_find_round_trips_every_field() {
    // BEHAVIOR: a freshly created record must come back from find_by_token
    // with identical field values
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let created = record("AB12CD34", "work");
    let id = store.create(&created).unwrap();
    assert_eq!(id, created.id);

    let found = store.find_by_token("AB12CD34").unwrap().unwrap();
    assert_eq!(found, created);
}

#[test]
fn test_create_never_overwrites_an_existing_record() {
    // BEHAVIOR: records are write-once; a second create with the same id
    // is a creation failure, not a silent overwrite
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let rec = record("AB12CD34", "work");
    store.create(&rec).unwrap();

    match store.create(&rec) {
        Err(StoreError::DuplicateId(id)) => assert_eq!(id, rec.id),
        other => panic!("expected DuplicateId, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_find_by_token_misses_unknown_token() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.find_by_token("ZZ99ZZ99").unwrap().is_none());
}

#[test]
fn test_find_by_token_never_returns_expired_records() {
    // BEHAVIOR: an expired record still on disk is indistinguishable from
    // an absent one
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut rec = record("AB12CD34", "work");
    rec.created = Utc::now() - Duration::hours(25);
    rec.expires = Utc::now() - Duration::hours(1);
    store.create(&rec).unwrap();

    assert!(store.find_by_token("AB12CD34").unwrap().is_none());
}

#[test]
fn test_find_by_token_prefers_most_recently_created_on_collision() {
    // BEHAVIOR: if two live records ever share a token, the newer one wins
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut older = record("AB12CD34", "old-target");
    older.created = Utc::now() - Duration::hours(2);
    let newer = record("AB12CD34", "new-target");

    store.create(&older).unwrap();
    store.create(&newer).unwrap();

    let found = store.find_by_token("AB12CD34").unwrap().unwrap();
    assert_eq!(found.id, newer.id);
    assert_eq!(found.target_session, "new-target");
}

#[test]
fn test_remove_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let rec = record("AB12CD34", "work");
    store.create(&rec).unwrap();

    store.remove(rec.id).unwrap();
    assert!(store.find_by_token("AB12CD34").unwrap().is_none());

    // Removing again is not an error
    store.remove(rec.id).unwrap();
    store.remove(Uuid::new_v4()).unwrap();
}

#[test]
fn test_corrupt_record_files_are_skipped_not_fatal() {
    // BEHAVIOR: one unparseable file must not take down the token scan
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    std::fs::write(dir.path().join(format!("{}.json", Uuid::new_v4())), "not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let rec = record("AB12CD34", "work");
    store.create(&rec).unwrap();

    let found = store.find_by_token("AB12CD34").unwrap().unwrap();
    assert_eq!(found.id, rec.id);
}

#[test]
fn test_sweep_expired_removes_only_expired_records() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let live = record("AB12CD34", "work");
    let mut expired_a = record("EF56GH78", "work");
    expired_a.expires = Utc::now() - Duration::seconds(1);
    let mut expired_b = record("IJ90KL12", "work");
    expired_b.expires = Utc::now() - Duration::hours(3);

    store.create(&live).unwrap();
    store.create(&expired_a).unwrap();
    store.create(&expired_b).unwrap();

    let removed = store.sweep_expired().unwrap();
    assert_eq!(removed, 2);

    assert!(store.find_by_token("AB12CD34").unwrap().is_some());
    assert!(store.find_by_token("EF56GH78").unwrap().is_none());
    assert!(store.find_by_token("IJ90KL12").unwrap().is_none());
}

#[test]
fn test_records_are_individually_addressable_on_disk() {
    // BEHAVIOR: one JSON file per record, readable without any index
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let rec = record("AB12CD34", "work");
    store.create(&rec).unwrap();

    let path = dir.path().join(format!("{}.json", rec.id));
    let content = std::fs::read_to_string(path).unwrap();
    let parsed: SessionRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, rec);
}
