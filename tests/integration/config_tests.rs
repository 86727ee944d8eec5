//! Configuration loading tests exercised through the CLI.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::fixtures::{empty_store, read_store, store_with};

/// Command without `--no-config`, for tests that pass `--config`.
fn sth_with_config() -> Command {
    Command::cargo_bin("sth").expect("Failed to find sth binary")
}

#[test]
fn test_exclude_patterns_hide_streams_from_list() {
    let store = store_with(&["cam1", "tmp-scratch", "cam2"]);
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[exclude]
patterns = ["tmp-*"]
"#,
    )
    .unwrap();

    sth_with_config()
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cam1"))
        .stdout(predicate::str::contains("tmp-scratch").not())
        .stdout(predicate::str::contains("2 streams found"));
}

#[test]
fn test_no_exclude_flag_shows_hidden_streams() {
    let store = store_with(&["cam1", "tmp-scratch"]);
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[exclude]
patterns = ["tmp-*"]
"#,
    )
    .unwrap();

    sth_with_config()
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .arg("--no-exclude")
        .assert()
        .success()
        .stdout(predicate::str::contains("tmp-scratch"));
}

#[test]
fn test_config_store_path_override() {
    let dir = tempfile::TempDir::new().unwrap();
    let store_path = dir.path().join("configured-history.json");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[store]\npath = \"{}\"\n", store_path.display()),
    )
    .unwrap();

    sth_with_config()
        .arg("--config")
        .arg(&config_path)
        .args(["add", "cam1", "rtsp://10.0.0.5/s"])
        .assert()
        .success();

    let history = read_store(&store_path);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_cli_store_flag_beats_config_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_store = dir.path().join("from-config.json");
    let flag_store = dir.path().join("from-flag.json");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[store]\npath = \"{}\"\n", config_store.display()),
    )
    .unwrap();

    sth_with_config()
        .arg("--config")
        .arg(&config_path)
        .arg("--store")
        .arg(&flag_store)
        .args(["add", "cam1", "rtsp://10.0.0.5/s"])
        .assert()
        .success();

    assert!(flag_store.exists());
    assert!(!config_store.exists());
}

#[test]
fn test_config_max_entries_evicts_oldest() {
    let store = empty_store();
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[store]
max_entries = 2
"#,
    )
    .unwrap();

    for name in ["cam1", "cam2", "cam3"] {
        sth_with_config()
            .arg("--store")
            .arg(&store.path)
            .arg("--config")
            .arg(&config_path)
            .args(["add", name, "rtsp://10.0.0.5/s"])
            .assert()
            .success();
    }

    let history = read_store(&store.path);
    assert_eq!(history.names(), vec!["cam2", "cam3"]);
}

#[test]
fn test_config_relay_base_used_for_derivation() {
    let store = empty_store();
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[relay]
rtsp_base = "rtsp://relay.lan:5544/live/"
"#,
    )
    .unwrap();

    sth_with_config()
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .args(["add", "cam1", "rtsp://10.0.0.5/s", "--relay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rtsp://relay.lan:5544/live/cam1"));

    assert_eq!(
        read_store(&store.path).get("cam1").unwrap().url,
        "rtsp://relay.lan:5544/live/cam1"
    );
}

#[test]
fn test_invalid_cli_config_fails_with_config_exit_code() {
    let store = empty_store();
    let config_path = store.dir.path().join("broken.toml");
    std::fs::write(&config_path, "this is not { toml").unwrap();

    sth_with_config()
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_no_config_ignores_config_file() {
    let store = store_with(&["tmp-scratch"]);
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[exclude]
patterns = ["tmp-*"]
"#,
    )
    .unwrap();

    // --no-config wins: the exclude pattern never loads
    sth_with_config()
        .arg("--no-config")
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("tmp-scratch"));
}

#[test]
fn test_player_command_from_config() {
    let store = store_with(&["cam1"]);
    let config_path = store.dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[player]
command = "mpv --profile=low-latency"
"#,
    )
    .unwrap();

    sth_with_config()
        .arg("--store")
        .arg(&store.path)
        .arg("--config")
        .arg(&config_path)
        .args(["play", "cam1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Would run: mpv --profile=low-latency rtsp://10.0.0.5/cam1",
        ));
}
