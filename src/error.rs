//! Custom error types for sth.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for sth.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// A stream with the same name already exists.
    pub const DUPLICATE_NAME: i32 = 2;
    /// No stream with the given name.
    pub const STREAM_NOT_FOUND: i32 = 3;
    /// The external player failed.
    pub const PLAYER_FAILED: i32 = 4;
    /// Invalid configuration.
    pub const INVALID_CONFIG: i32 = 5;
    /// Interrupted (Ctrl+C).
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for sth.
#[derive(Error, Debug)]
pub enum SthError {
    /// A stream with the same name is already recorded.
    #[error("Stream '{name}' already exists: ensure the stream name is unique\n\nTip: pick a different name, or remove the old entry first with 'sth remove {name}'.")]
    DuplicateName { name: String },

    /// Stream not found.
    #[error("Stream '{name}' not found")]
    StreamNotFound { name: String },

    /// Stream not found, with suggestions.
    #[error("Stream '{name}' not found\n\nDid you mean: {suggestions}?\n\nRun 'sth list' to see all recorded streams.")]
    StreamNotFoundWithSuggestions { name: String, suggestions: String },

    /// URL without a scheme.
    #[error("'{url}' does not look like a stream URL\n\nTip: stream URLs start with a scheme, e.g. rtsp://host:554/path or https://host/live.m3u8.")]
    InvalidUrl { url: String },

    /// The external player exited with a failure code.
    #[error("Player command '{command}' failed with exit code {code}")]
    PlayerFailed { command: String, code: i32 },

    /// No player configured and none given on the command line.
    #[error("No player configured\n\nTip: set [player] command in the config file or pass --player '<command>'.")]
    NoPlayer,

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid configuration file.
    #[error("Invalid config at {path}:\n  {message}\n\nTip: check the config file syntax and ensure all values are valid.")]
    InvalidConfig { path: PathBuf, message: String },

    /// Terminal too small for the TUI.
    #[error("Terminal too small (minimum: {min_width}x{min_height}, current: {width}x{height})\n\nTip: resize your terminal window or use 'sth list' for non-interactive mode.")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    /// Failed to parse a JSON store or import file.
    #[error("Failed to parse stream list: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Failed to parse a YAML import file.
    #[error("Failed to parse stream list: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    /// IO error with path context.
    #[error("Failed to {operation} '{path}': {source}")]
    IoWithContext {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SthError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SthError::DuplicateName { .. } => exit_code::DUPLICATE_NAME,
            SthError::StreamNotFound { .. } => exit_code::STREAM_NOT_FOUND,
            SthError::StreamNotFoundWithSuggestions { .. } => exit_code::STREAM_NOT_FOUND,
            SthError::InvalidUrl { .. } => exit_code::GENERAL_ERROR,
            SthError::PlayerFailed { .. } => exit_code::PLAYER_FAILED,
            SthError::NoPlayer => exit_code::PLAYER_FAILED,
            SthError::ConfigError { .. } => exit_code::INVALID_CONFIG,
            SthError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
            SthError::TerminalTooSmall { .. } => exit_code::GENERAL_ERROR,
            SthError::ParseError(_) => exit_code::GENERAL_ERROR,
            SthError::YamlParseError(_) => exit_code::GENERAL_ERROR,
            SthError::IoWithContext { .. } => exit_code::GENERAL_ERROR,
            SthError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Create a stream-not-found error with suggestions from the catalog.
    pub fn stream_not_found_with_suggestions(name: &str, names: &[&str]) -> Self {
        let suggestions = find_similar_names(name, names);
        if suggestions.is_empty() {
            SthError::StreamNotFound {
                name: name.to_string(),
            }
        } else {
            SthError::StreamNotFoundWithSuggestions {
                name: name.to_string(),
                suggestions: suggestions.join(", "),
            }
        }
    }
}

/// Find similar stream names using simple string distance.
fn find_similar_names(name: &str, names: &[&str]) -> Vec<String> {
    let name_lower = name.to_lowercase();
    let mut matches: Vec<(String, usize)> = names
        .iter()
        .filter_map(|&s| {
            let s_lower = s.to_lowercase();
            let dist = simple_distance(&name_lower, &s_lower);
            if dist <= 3 || s_lower.contains(&name_lower) || name_lower.contains(&s_lower) {
                Some((s.to_string(), dist))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by_key(|(_, d)| *d);

    matches
        .into_iter()
        .take(3)
        .map(|(s, _)| format!("'{}'", s))
        .collect()
}

/// Simple Levenshtein distance for short names.
fn simple_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let len_a = a_chars.len();
    let len_b = b_chars.len();

    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }

    let mut matrix = vec![vec![0; len_b + 1]; len_a + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len_a + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len_b + 1) {
        *cell = j;
    }

    for i in 1..=len_a {
        for j in 1..=len_b {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len_a][len_b]
}

/// Result type alias for sth operations.
pub type Result<T> = std::result::Result<T, SthError>;
