//! Integration tests for catalog operations and persistence.

use std::fs;

use stream_history::history::{AddOutcome, History};
use stream_history::stream::{StreamRecord, StreamStatus};
use tempfile::TempDir;

use crate::fixtures::empty_store;

fn record(name: &str) -> StreamRecord {
    StreamRecord::direct(name, format!("rtsp://10.0.0.5/{name}"))
}

// ==================== Basic Operations ====================

#[test]
fn test_history_new() {
    let history = History::default();
    assert!(history.is_empty());
}

#[test]
fn test_add_keeps_call_order() {
    let mut history = History::new();

    let names = ["e", "a", "c", "b", "d"];
    for name in names {
        assert!(history.add(record(name)).is_added());
    }

    assert_eq!(history.len(), names.len());
    assert_eq!(history.names(), names);
}

#[test]
fn test_add_duplicate_is_rejected_without_mutation() {
    let mut history = History::new();
    let _ = history.add(record("cam1"));
    let _ = history.add(record("cam2"));

    let outcome = history.add(StreamRecord::direct("cam1", "rtsp://elsewhere/x"));
    assert_eq!(outcome, AddOutcome::DuplicateName);

    assert_eq!(history.len(), 2);
    assert_eq!(history.get("cam1").unwrap().url, "rtsp://10.0.0.5/cam1");
}

#[test]
fn test_lookup_matches_name_not_key() {
    let mut history = History::new();
    let _ = history.add(record("cam1").with_key("row-99"));

    assert!(history.get("cam1").is_some());
    assert!(history.get("row-99").is_none());
}

#[test]
fn test_remove_shifts_following_records() {
    let mut history = History::new();
    for name in ["a", "b", "c", "d"] {
        let _ = history.add(record(name));
    }

    let removed = history.remove("b").unwrap();
    assert_eq!(removed.name, "b");
    assert_eq!(history.names(), vec!["a", "c", "d"]);
}

#[test]
fn test_remove_not_found_never_drops_last() {
    let mut history = History::new();
    for name in ["a", "b", "c"] {
        let _ = history.add(record(name));
    }

    assert!(history.remove("nope").is_none());
    assert_eq!(history.names(), vec!["a", "b", "c"]);
}

#[test]
fn test_replace_all_then_read_back() {
    let mut history = History::new();
    let _ = history.add(record("before"));

    let list = vec![record("x"), record("x"), record("y")];
    history.replace_all(list.clone());

    assert_eq!(history.streams(), list.as_slice());
}

// ==================== Persistence ====================

#[test]
fn test_save_and_load() {
    let store = empty_store();

    let mut history = History::new();
    let _ = history.add(record("cam1"));
    let _ = history.add(record("cam2").with_status(StreamStatus::Error));
    history.save_to(&store.path).expect("Failed to save");

    let loaded = History::load_from(&store.path).expect("Failed to load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get("cam2").unwrap().status, StreamStatus::Error);
    assert_eq!(loaded.names(), vec!["cam1", "cam2"]);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let history = History::load_from(&temp.path().join("missing.json")).unwrap();
    assert!(history.is_empty());
}

#[test]
fn test_load_corrupt_file_backs_up_and_starts_fresh() {
    let store = empty_store();
    fs::write(&store.path, "not json at all").unwrap();

    let history = History::load_from(&store.path).unwrap();
    assert!(history.is_empty());

    let backup = store.dir.path().join("history.json.bak");
    assert!(backup.exists());
    assert_eq!(fs::read_to_string(backup).unwrap(), "not json at all");
}

#[test]
fn test_persisted_file_is_pretty_json() {
    let store = empty_store();

    let mut history = History::new();
    let _ = history.add(record("cam1"));
    history.save_to(&store.path).unwrap();

    let content = fs::read_to_string(&store.path).unwrap();
    assert!(content.contains('\n'), "store should be human-readable");
    assert!(content.contains("\"version\""));
    assert!(content.contains("\"cam1\""));
    assert!(content.contains("\"stopped\""));
}

#[test]
fn test_mutations_survive_save_load_cycles() {
    let store = empty_store();

    let mut history = History::new();
    let _ = history.add(record("a"));
    let _ = history.add(record("b"));
    history.save_to(&store.path).unwrap();

    let mut history = History::load_from(&store.path).unwrap();
    history.set_status("a", StreamStatus::Success);
    let _ = history.remove("b");
    let _ = history.add(record("c"));
    history.save_to(&store.path).unwrap();

    let history = History::load_from(&store.path).unwrap();
    assert_eq!(history.names(), vec!["a", "c"]);
    assert_eq!(history.get("a").unwrap().status, StreamStatus::Success);
}

// ==================== Limits ====================

#[test]
fn test_cleanup_respects_insertion_order() {
    let mut history = History::new();
    for i in 0..10 {
        let _ = history.add(record(&format!("cam{i}")));
    }

    history.cleanup(4);

    assert_eq!(history.names(), vec!["cam6", "cam7", "cam8", "cam9"]);
}

// ==================== Alternate formats ====================

#[test]
fn test_records_roundtrip_through_yaml() {
    let records = vec![
        record("cam1"),
        StreamRecord::relayed("cam2", "rtsp://10.0.0.6/s", "rtsp://relay/live/cam2")
            .with_status(StreamStatus::Error),
    ];

    let yaml = serde_yaml::to_string(&records).unwrap();
    let parsed: Vec<StreamRecord> = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed, records);
}
