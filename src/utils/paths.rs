//! Path utilities.

use std::path::{Path, PathBuf};

/// Get the config directory for sth.
///
/// Returns `~/.config/sth` on Unix-like systems.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sth"))
}

/// Get the history file path.
///
/// Returns `~/.config/sth/history.json`.
pub fn history_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("history.json"))
}

/// Get the global config file path.
///
/// Returns `~/.config/sth/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Find a local config file in the given directory.
///
/// Looks for `.sthrc.toml`.
pub fn local_config_file(dir: &Path) -> Option<PathBuf> {
    let config_file = dir.join(".sthrc.toml");
    if config_file.exists() {
        Some(config_file)
    } else {
        None
    }
}
