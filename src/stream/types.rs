//! Stream record type definitions.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Status of a stream source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    /// The stream is not currently running.
    #[default]
    Stopped,
    /// The last session ended successfully.
    Success,
    /// The last session failed or disconnected.
    Error,
}

impl StreamStatus {
    /// Cycle to the next status (used by the TUI status key).
    pub fn next(self) -> Self {
        match self {
            StreamStatus::Stopped => StreamStatus::Success,
            StreamStatus::Success => StreamStatus::Error,
            StreamStatus::Error => StreamStatus::Stopped,
        }
    }

    /// Short label for list output.
    pub fn label(&self) -> &'static str {
        match self {
            StreamStatus::Stopped => "stopped",
            StreamStatus::Success => "success",
            StreamStatus::Error => "error",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single stream source in the history catalog.
///
/// `name` is the user-facing handle and must be unique within the
/// catalog; `key` is an opaque caller-supplied identifier and is never
/// used for lookup.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Opaque identifier supplied by the caller.
    pub key: String,
    /// Display name, unique across the catalog.
    pub name: String,
    /// Playback URL.
    pub url: String,
    /// Source URL before any relay transformation.
    pub origin_url: String,
    /// Current status.
    #[serde(default)]
    pub status: StreamStatus,
    /// Whether the stream is re-published through a relay.
    #[serde(default)]
    pub relay: bool,
}

impl StreamRecord {
    /// Create a record with every field given explicitly.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        origin_url: impl Into<String>,
        status: StreamStatus,
        relay: bool,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            url: url.into(),
            origin_url: origin_url.into(),
            status,
            relay,
        }
    }

    /// Create a direct (non-relayed) record; the playback URL and the
    /// origin URL are the same and the key defaults to the name.
    pub fn direct(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let url = url.into();
        Self {
            key: name.clone(),
            name,
            url: url.clone(),
            origin_url: url,
            status: StreamStatus::Stopped,
            relay: false,
        }
    }

    /// Create a relayed record: playback goes through `url` while the
    /// source stays in `origin_url`.
    pub fn relayed(
        name: impl Into<String>,
        origin_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            url: url.into(),
            origin_url: origin_url.into(),
            status: StreamStatus::Stopped,
            relay: true,
        }
    }

    /// Set the key, replacing the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: StreamStatus) -> Self {
        self.status = status;
        self
    }
}

impl fmt::Debug for StreamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamRecord")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("url", &self.url)
            .field("origin_url", &self.origin_url)
            .field("status", &self.status)
            .field("relay", &self.relay)
            .finish()
    }
}

impl fmt::Display for StreamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relay {
            write!(f, "{} [relay]: {} <- {}", self.name, self.url, self.origin_url)
        } else {
            write!(f, "{}: {}", self.name, self.url)
        }
    }
}
