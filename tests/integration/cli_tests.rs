//! CLI integration tests for sth.
//!
//! These tests verify the command-line interface behavior using assert_cmd.
//! Every invocation points at an isolated temporary store.

use predicates::prelude::*;

use stream_history::stream::{StreamRecord, StreamStatus};

use crate::fixtures::{empty_store, read_store, sth, store_with, store_with_records};

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    let store = empty_store();
    sth(&store.path)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fast interactive TUI for managing live stream source history",
        ))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_version_output() {
    let store = empty_store();
    sth(&store.path)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sth"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

// ==================== Add ====================

#[test]
fn test_add_records_stream() {
    let store = empty_store();

    sth(&store.path)
        .args(["add", "front-door", "rtsp://10.0.0.5/door"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded stream 'front-door'"));

    let history = read_store(&store.path);
    assert_eq!(history.len(), 1);
    let record = history.get("front-door").unwrap();
    assert_eq!(record.url, "rtsp://10.0.0.5/door");
    assert_eq!(record.origin_url, "rtsp://10.0.0.5/door");
    assert_eq!(record.status, StreamStatus::Stopped);
    assert!(!record.relay);
}

#[test]
fn test_add_duplicate_name_rejected() {
    let store = store_with(&["front-door"]);

    sth(&store.path)
        .args(["add", "front-door", "rtsp://10.0.0.9/other"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("ensure the stream name is unique"));

    // Catalog unchanged
    let history = read_store(&store.path);
    assert_eq!(history.len(), 1);
    assert_eq!(history.get("front-door").unwrap().url, "rtsp://10.0.0.5/front-door");
}

#[test]
fn test_add_relay_derives_playback_url() {
    let store = empty_store();

    sth(&store.path)
        .args(["add", "cam1", "rtsp://10.0.0.5/stream", "--relay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rtsp://127.0.0.1:5544/live/cam1"))
        .stdout(predicate::str::contains("http://127.0.0.1:8080/hls/cam1.m3u8"));

    let history = read_store(&store.path);
    let record = history.get("cam1").unwrap();
    assert!(record.relay);
    assert_eq!(record.origin_url, "rtsp://10.0.0.5/stream");
    assert_eq!(record.url, "rtsp://127.0.0.1:5544/live/cam1");
}

#[test]
fn test_add_with_key_and_status() {
    let store = empty_store();

    sth(&store.path)
        .args([
            "add", "cam1", "rtsp://10.0.0.5/s", "--key", "row-42", "--status", "success",
        ])
        .assert()
        .success();

    let history = read_store(&store.path);
    let record = history.get("cam1").unwrap();
    assert_eq!(record.key, "row-42");
    assert_eq!(record.status, StreamStatus::Success);
}

#[test]
fn test_add_url_without_scheme_rejected() {
    let store = empty_store();

    sth(&store.path)
        .args(["add", "cam1", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not look like a stream URL"));

    assert!(read_store(&store.path).is_empty());
}

#[test]
fn test_add_unknown_scheme_warns_but_records() {
    let store = empty_store();

    sth(&store.path)
        .args(["add", "cam1", "ftp://10.0.0.5/listing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unrecognized URL scheme"));

    assert_eq!(read_store(&store.path).len(), 1);
}

// ==================== List ====================

#[test]
fn test_list_empty() {
    let store = empty_store();

    sth(&store.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 streams found"));
}

#[test]
fn test_list_shows_streams() {
    let store = store_with(&["front-door", "back-yard", "garage"]);

    sth(&store.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("front-door"))
        .stdout(predicate::str::contains("back-yard"))
        .stdout(predicate::str::contains("garage"))
        .stdout(predicate::str::contains("3 streams found"));
}

#[test]
fn test_list_filter() {
    let store = store_with(&["front-door", "back-yard", "garage"]);

    sth(&store.path)
        .args(["list", "--filter", "garage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("garage"))
        .stdout(predicate::str::contains("front-door").not())
        .stdout(predicate::str::contains("1 streams found"));
}

#[test]
fn test_list_status_filter() {
    let store = store_with_records(vec![
        StreamRecord::direct("ok", "rtsp://h/ok").with_status(StreamStatus::Success),
        StreamRecord::direct("down", "rtsp://h/down").with_status(StreamStatus::Error),
    ]);

    sth(&store.path)
        .args(["list", "--status", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("ok").not());
}

#[test]
fn test_list_relay_marker() {
    let store = store_with_records(vec![crate::fixtures::relayed_record(
        "cam1",
        StreamStatus::Stopped,
    )]);

    sth(&store.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[relay]"));
}

#[test]
fn test_list_sort_by_name() {
    let store = store_with(&["zulu", "alpha"]);

    let output = sth(&store.path)
        .args(["list", "--sort", "name"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let alpha_pos = stdout.find("alpha").unwrap();
    let zulu_pos = stdout.find("zulu").unwrap();
    assert!(alpha_pos < zulu_pos);
}

// ==================== Show ====================

#[test]
fn test_show_details() {
    let store = store_with_records(vec![crate::fixtures::relayed_record(
        "cam1",
        StreamStatus::Success,
    )]);

    sth(&store.path)
        .args(["show", "cam1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name:    cam1"))
        .stdout(predicate::str::contains("status:  success"))
        .stdout(predicate::str::contains("relay:   true"))
        .stdout(predicate::str::contains("origin:  rtsp://10.0.0.5/cam1"))
        .stdout(predicate::str::contains("hls:     http://127.0.0.1:8080/hls/cam1.m3u8"));
}

#[test]
fn test_show_missing_suggests() {
    let store = store_with(&["front-door"]);

    sth(&store.path)
        .args(["show", "front-dor"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("front-door"));
}

// ==================== Remove ====================

#[test]
fn test_remove_stream() {
    let store = store_with(&["cam1", "cam2"]);

    sth(&store.path)
        .args(["remove", "cam1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed stream 'cam1'"));

    let history = read_store(&store.path);
    assert_eq!(history.len(), 1);
    assert!(history.get("cam1").is_none());
    assert!(history.get("cam2").is_some());
}

#[test]
fn test_remove_missing_leaves_store_untouched() {
    let store = store_with(&["cam1", "cam2"]);

    sth(&store.path)
        .args(["remove", "cam9"])
        .assert()
        .failure()
        .code(3);

    // No record was dropped, in particular not the last one
    let history = read_store(&store.path);
    assert_eq!(history.names(), vec!["cam1", "cam2"]);
}

// ==================== Set-status ====================

#[test]
fn test_set_status() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["set-status", "cam1", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked error"));

    assert_eq!(
        read_store(&store.path).get("cam1").unwrap().status,
        StreamStatus::Error
    );
}

#[test]
fn test_set_status_missing_stream() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["set-status", "cam9", "error"])
        .assert()
        .failure()
        .code(3);
}

// ==================== Play ====================

#[test]
fn test_play_dry_run() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["play", "cam1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would run: ffplay"))
        .stdout(predicate::str::contains("rtsp://10.0.0.5/cam1"));
}

#[test]
fn test_play_dry_run_with_player_override() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["play", "cam1", "--dry-run", "--player", "mpv --no-audio"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Would run: mpv --no-audio rtsp://10.0.0.5/cam1",
        ));
}

#[cfg(unix)]
#[test]
fn test_play_success_records_status() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["play", "cam1", "--player", "true"])
        .assert()
        .success();

    assert_eq!(
        read_store(&store.path).get("cam1").unwrap().status,
        StreamStatus::Success
    );
}

#[cfg(unix)]
#[test]
fn test_play_failure_records_error() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["play", "cam1", "--player", "false"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("failed with exit code"));

    assert_eq!(
        read_store(&store.path).get("cam1").unwrap().status,
        StreamStatus::Error
    );
}

#[test]
fn test_play_missing_stream() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["play", "cam9", "--dry-run"])
        .assert()
        .failure()
        .code(3);
}

// ==================== Import / Export ====================

#[test]
fn test_export_stdout_json() {
    let store = store_with(&["cam1", "cam2"]);

    let output = sth(&store.path)
        .arg("export")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: Vec<StreamRecord> = serde_json::from_slice(&output).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "cam1");
}

#[test]
fn test_export_then_import_roundtrip() {
    let source = store_with(&["cam1", "cam2", "cam3"]);
    let export_path = source.dir.path().join("export.json");

    sth(&source.path)
        .arg("export")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 streams"));

    let target = empty_store();
    sth(&target.path)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 streams"));

    let history = read_store(&target.path);
    assert_eq!(history.names(), vec!["cam1", "cam2", "cam3"]);
}

#[test]
fn test_export_yaml_roundtrip() {
    let source = store_with(&["cam1", "cam2"]);
    let export_path = source.dir.path().join("streams.yaml");

    sth(&source.path)
        .arg("export")
        .arg(&export_path)
        .assert()
        .success();

    let target = empty_store();
    sth(&target.path)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success();

    assert_eq!(read_store(&target.path).len(), 2);
}

#[test]
fn test_import_replaces_without_validation() {
    // A bulk import may legitimately carry duplicate names.
    let records = vec![
        StreamRecord::direct("cam", "rtsp://h/1"),
        StreamRecord::direct("cam", "rtsp://h/2"),
    ];
    let json = serde_json::to_string_pretty(&records).unwrap();

    let store = store_with(&["existing"]);
    let import_path = store.dir.path().join("dupes.json");
    std::fs::write(&import_path, json).unwrap();

    sth(&store.path)
        .arg("import")
        .arg(&import_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 streams"));

    // Previous contents replaced wholesale, duplicates preserved as-is
    let history = read_store(&store.path);
    assert_eq!(history.names(), vec!["cam", "cam"]);
}

#[test]
fn test_import_merge_skips_duplicates() {
    let records = vec![
        StreamRecord::direct("cam1", "rtsp://h/1"),
        StreamRecord::direct("new-cam", "rtsp://h/2"),
    ];
    let json = serde_json::to_string_pretty(&records).unwrap();

    let store = store_with(&["cam1"]);
    let import_path = store.dir.path().join("merge.json");
    std::fs::write(&import_path, json).unwrap();

    sth(&store.path)
        .args(["import", "--merge"])
        .arg(&import_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 streams (1 skipped)"))
        .stderr(predicate::str::contains("ensure the stream name is unique"));

    let history = read_store(&store.path);
    assert_eq!(history.names(), vec!["cam1", "new-cam"]);
}

#[test]
fn test_import_missing_file() {
    let store = empty_store();

    sth(&store.path)
        .args(["import", "/does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_import_invalid_json() {
    let store = empty_store();
    let bad_path = store.dir.path().join("bad.json");
    std::fs::write(&bad_path, "{ not json").unwrap();

    sth(&store.path)
        .arg("import")
        .arg(&bad_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse stream list"));
}

// ==================== Misc ====================

#[test]
fn test_completions_bash() {
    let store = empty_store();

    sth(&store.path)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sth"));
}

#[test]
fn test_init_config_prints_example() {
    let store = empty_store();

    sth(&store.path)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[relay]"))
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("[exclude]"));
}

#[test]
fn test_debug_flag_prints_paths() {
    let store = store_with(&["cam1"]);

    sth(&store.path)
        .args(["list", "--debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("debug mode"))
        .stderr(predicate::str::contains("History file:"));
}

#[test]
fn test_corrupt_store_backed_up_and_ignored() {
    let store = empty_store();
    std::fs::write(&store.path, "{ broken json").unwrap();

    sth(&store.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 streams found"))
        .stderr(predicate::str::contains("corrupt"));

    assert!(store.dir.path().join("history.json.bak").exists());
}
