//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stream::{DEFAULT_HLS_BASE, DEFAULT_RTSP_BASE};

/// Sort mode for stream display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep catalog insertion order.
    #[default]
    Insertion,
    /// Sort alphabetically by name.
    Name,
    /// Group by status (errors first, then success, then stopped).
    Status,
}

/// Color theme for the TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Full color theme.
    #[default]
    Default,
    /// Minimal colors.
    Minimal,
    /// No colors (monochrome).
    None,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default sort mode for list and TUI output.
    #[serde(default)]
    pub default_sort: SortMode,
    /// Show the playback URL in the detail panel.
    #[serde(default = "default_true")]
    pub show_url_preview: bool,
    /// Maximum items to show (0 = unlimited).
    #[serde(default)]
    pub max_items: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_sort: SortMode::default(),
            show_url_preview: true,
            max_items: 0,
        }
    }
}

/// Filter configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Enable fuzzy matching.
    #[serde(default = "default_true")]
    pub fuzzy: bool,
    /// Case sensitive search.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Search in URLs too.
    #[serde(default = "default_true")]
    pub search_urls: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fuzzy: true,
            case_sensitive: false,
            search_urls: true,
        }
    }
}

/// Store location and limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Override the history file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Maximum number of entries to keep (0 = unlimited).
    ///
    /// When exceeded after an insert, the oldest entries are evicted.
    #[serde(default)]
    pub max_entries: usize,
}

/// Exclude patterns configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Glob patterns matched against stream names.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Relay server bases used to derive playback URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base for relayed playback URLs (the stream name is appended).
    #[serde(default = "default_rtsp_base")]
    pub rtsp_base: String,
    /// Base for the HLS playlist variant.
    #[serde(default = "default_hls_base")]
    pub hls_base: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            rtsp_base: default_rtsp_base(),
            hls_base: default_hls_base(),
        }
    }
}

/// External player settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Command line used to play a stream; the URL is appended.
    #[serde(default = "default_player")]
    pub command: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player(),
        }
    }
}

/// Appearance configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Color theme.
    #[serde(default)]
    pub theme: Theme,
    /// Show status icons.
    #[serde(default = "default_true")]
    pub icons: bool,
    /// Show help footer.
    #[serde(default = "default_true")]
    pub show_footer: bool,
    /// Compact mode (less padding).
    #[serde(default)]
    pub compact: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            icons: true,
            show_footer: true,
            compact: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Filter settings.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Store location and limits.
    #[serde(default)]
    pub store: StoreConfig,
    /// Exclude patterns.
    #[serde(default)]
    pub exclude: ExcludeConfig,
    /// Relay URL bases.
    #[serde(default)]
    pub relay: RelayConfig,
    /// External player.
    #[serde(default)]
    pub player: PlayerConfig,
    /// Appearance settings.
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

impl Config {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the config file path in the user's config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sth").join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for set values).
    pub fn merge(&mut self, other: Config) {
        // General settings
        self.general.default_sort = other.general.default_sort;
        self.general.show_url_preview = other.general.show_url_preview;
        if other.general.max_items > 0 {
            self.general.max_items = other.general.max_items;
        }

        // Filter settings
        self.filter = other.filter;

        // Store settings
        if other.store.path.is_some() {
            self.store.path = other.store.path;
        }
        if other.store.max_entries > 0 {
            self.store.max_entries = other.store.max_entries;
        }

        // Exclude patterns - append rather than replace
        self.exclude.patterns.extend(other.exclude.patterns);

        // Relay, player and appearance
        self.relay = other.relay;
        self.player = other.player;
        self.appearance = other.appearance;
    }
}

fn default_true() -> bool {
    true
}

fn default_rtsp_base() -> String {
    DEFAULT_RTSP_BASE.to_string()
}

fn default_hls_base() -> String {
    DEFAULT_HLS_BASE.to_string()
}

fn default_player() -> String {
    "ffplay -hide_banner -loglevel error".to_string()
}
