//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Load configuration from the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Load configuration with proper priority and merging.
///
/// Searches for config files in order of priority (lowest to highest):
/// 1. `~/.config/sth/config.toml` (user-level, lowest priority)
/// 2. `.sthrc.toml` in the working directory (project-level)
/// 3. CLI argument `--config <path>` (highest priority)
///
/// Configs are merged with higher priority configs overriding lower
/// priority ones. Missing config files are handled gracefully.
///
/// # Errors
///
/// Returns an error if a config file specified via CLI cannot be read or
/// parsed. Missing default config files are not treated as errors.
pub fn load_config(cli_config_path: Option<&Path>, working_dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    // Load user-level config (lowest priority)
    if let Some(user_config_path) = Config::user_config_path() {
        if user_config_path.exists() {
            match load_config_from_path(&user_config_path) {
                Ok(user_config) => config.merge(user_config),
                Err(e) => {
                    // Warn but don't fail - use defaults
                    eprintln!(
                        "Warning: Failed to load user config at {}: {}",
                        user_config_path.display(),
                        e
                    );
                }
            }
        }
    }

    // Load project-level config (medium priority)
    let local_config_path = working_dir.join(".sthrc.toml");
    if local_config_path.exists() {
        match load_config_from_path(&local_config_path) {
            Ok(local_config) => config.merge(local_config),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load local config at {}: {}",
                    local_config_path.display(),
                    e
                );
            }
        }
    }

    // Load CLI-specified config (highest priority)
    if let Some(cli_path) = cli_config_path {
        let cli_config = load_config_from_path(cli_path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                cli_path.display()
            )
        })?;
        config.merge(cli_config);
    }

    Ok(config)
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# sth Configuration File
# Place this file at ~/.config/sth/config.toml for global settings
# or .sthrc.toml in your working directory for local settings

# General settings
[general]
# Default sort mode: "insertion", "name", "status"
default_sort = "insertion"

# Show the playback URL in the detail panel
show_url_preview = true

# Maximum items to show (0 = unlimited)
max_items = 0

# Filter settings
[filter]
# Fuzzy matching
fuzzy = true

# Case sensitive search
case_sensitive = false

# Search in URLs too
search_urls = true

# Store settings
[store]
# Override the history file location
# path = "/var/lib/sth/history.json"

# Maximum number of entries to keep, oldest evicted first (0 = unlimited)
max_entries = 0

# Exclude patterns
[exclude]
# Glob patterns matched against stream names (hidden from list and TUI)
patterns = [
    # "test-*",
    # "tmp-*",
]

# Relay server bases
[relay]
# Base for relayed playback URLs; the stream name is appended
rtsp_base = "rtsp://127.0.0.1:5544/live/"

# Base for the HLS playlist variant
hls_base = "http://127.0.0.1:8080/hls/"

# External player
[player]
# Command used by 'sth play'; the stream URL is appended
command = "ffplay -hide_banner -loglevel error"

# Appearance settings
[appearance]
# Color theme: "default", "minimal", "none"
theme = "default"

# Show status icons
icons = true

# Show help footer
show_footer = true

# Compact mode (less padding)
compact = false
"#
    .to_string()
}
