//! History storage and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stream::{StreamRecord, StreamStatus};

/// Outcome of an insert attempt.
///
/// Inserts never fail loudly; a duplicate name leaves the catalog
/// untouched and the caller decides how to present the rejection.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The record was appended to the catalog.
    Added,
    /// A record with the same name already exists; nothing changed.
    DuplicateName,
}

impl AddOutcome {
    /// Check whether the record was inserted.
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// The persisted stream catalog.
///
/// Records keep insertion order. Names are unique, enforced on insert
/// only; [`History::replace_all`] deliberately performs no validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// Version of the history format.
    pub version: u32,
    /// When the file was last written.
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    /// The recorded streams, in insertion order.
    #[serde(default)]
    streams: Vec<StreamRecord>,
}

impl History {
    /// Current history format version.
    pub const VERSION: u32 = 1;

    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            saved_at: Utc::now(),
            streams: Vec::new(),
        }
    }

    /// Get the default history file path.
    pub fn file_path() -> Option<PathBuf> {
        crate::utils::history_file()
    }

    // ==================== Catalog operations ====================

    /// Insert a record, enforcing name uniqueness.
    ///
    /// On a duplicate name the catalog is left untouched and
    /// [`AddOutcome::DuplicateName`] is returned.
    pub fn add(&mut self, record: StreamRecord) -> AddOutcome {
        if self.contains(&record.name) {
            return AddOutcome::DuplicateName;
        }
        self.streams.push(record);
        AddOutcome::Added
    }

    /// Replace the entire catalog, no validation, no uniqueness check.
    pub fn replace_all(&mut self, streams: Vec<StreamRecord>) {
        self.streams = streams;
    }

    /// Borrow the current catalog in insertion order.
    pub fn streams(&self) -> &[StreamRecord] {
        &self.streams
    }

    /// Iterate over the records.
    pub fn iter(&self) -> impl Iterator<Item = &StreamRecord> {
        self.streams.iter()
    }

    /// Number of recorded streams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Check whether a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.streams.iter().any(|s| s.name == name)
    }

    /// Get the first record with this name.
    pub fn get(&self, name: &str) -> Option<&StreamRecord> {
        self.streams.iter().find(|s| s.name == name)
    }

    /// Remove the first record with this name.
    ///
    /// Returns the removed record, or `None` without touching the
    /// catalog when no record matches.
    pub fn remove(&mut self, name: &str) -> Option<StreamRecord> {
        let index = self.streams.iter().position(|s| s.name == name)?;
        Some(self.streams.remove(index))
    }

    /// Update the status of the named record in place.
    ///
    /// Returns false when no record matches.
    pub fn set_status(&mut self, name: &str, status: StreamStatus) -> bool {
        match self.streams.iter_mut().find(|s| s.name == name) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// All record names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.streams.iter().map(|s| s.name.as_str()).collect()
    }

    /// Enforce a maximum catalog size by evicting the oldest entries.
    ///
    /// A limit of 0 means unlimited.
    pub fn cleanup(&mut self, max_entries: usize) {
        if max_entries == 0 || self.streams.len() <= max_entries {
            return;
        }
        let to_remove = self.streams.len() - max_entries;
        self.streams.drain(..to_remove);
    }

    // ==================== Persistence ====================

    /// Load history from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::file_path().context("Could not determine config directory")?;
        Self::load_from(&path)
    }

    /// Load history from a specific file.
    ///
    /// Handles missing files gracefully (returns empty history).
    /// Handles corrupt files by backing up and returning empty history.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to read history file {}: {}",
                    path.display(),
                    e
                );
                return Ok(Self::new());
            }
        };

        match serde_json::from_str::<History>(&content) {
            Ok(history) => Ok(history),
            Err(e) => {
                // Corrupt file - backup and return empty
                eprintln!(
                    "Warning: History file is corrupt, backing up and starting fresh: {}",
                    e
                );

                let backup_path = path.with_extension("json.bak");
                if let Err(backup_err) = fs::rename(path, &backup_path) {
                    eprintln!(
                        "Warning: Failed to backup corrupt history file: {}",
                        backup_err
                    );
                } else {
                    eprintln!("Corrupt history backed up to {}", backup_path.display());
                }

                Ok(Self::new())
            }
        }
    }

    /// Save history to the default location.
    pub fn save(&mut self) -> Result<()> {
        let path = Self::file_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    /// Save history to a specific file.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        self.saved_at = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize history")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;

        Ok(())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
