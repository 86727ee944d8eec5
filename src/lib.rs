//! sth - Stream History
//!
//! A fast terminal tool for keeping a persisted catalog of live stream
//! sources (RTSP/RTMP/HLS URLs), browsing them interactively, and
//! launching a media player on any entry.
//!
//! # Features
//!
//! - **Persisted**: the catalog survives restarts as a JSON file under
//!   the user config directory
//! - **Unique names**: inserts enforce name uniqueness, so every stream
//!   has one unambiguous handle
//! - **Interactive**: fuzzy-filterable TUI with status colors
//! - **Scriptable**: add/list/show/remove/import/export subcommands for
//!   non-interactive use
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`config`] - Configuration file loading and types
//! - [`error`] - Error types and result helpers
//! - [`filter`] - Fuzzy filtering and exclude patterns
//! - [`history`] - The persisted stream catalog
//! - [`player`] - External player launch
//! - [`stream`] - Stream record types and relay URL helpers
//! - [`tui`] - Terminal user interface
//! - [`utils`] - Path and terminal utilities
//!
//! # Example
//!
//! ```no_run
//! use stream_history::history::History;
//! use stream_history::stream::StreamRecord;
//!
//! let mut history = History::load().expect("Failed to load history");
//!
//! let outcome = history.add(StreamRecord::direct("front-door", "rtsp://10.0.0.5/door"));
//! if outcome.is_added() {
//!     history.save().expect("Failed to save history");
//! }
//! ```

/// CLI argument definitions.
pub mod cli;

/// Configuration system for loading and merging settings.
pub mod config;

/// Error types and result helpers.
pub mod error;

/// Fuzzy filtering and exclude patterns.
pub mod filter;

/// The persisted stream catalog.
pub mod history;

/// External player launch.
pub mod player;

/// Stream record types and relay URL helpers.
pub mod stream;

/// Terminal user interface.
pub mod tui;

/// Path and terminal utilities.
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Config;
pub use error::{Result, SthError};
pub use history::{AddOutcome, History};
pub use stream::{StreamRecord, StreamStatus};
