//! Application state for the TUI.

use glob::Pattern;

use crate::config::{Config, SortMode};
use crate::filter::{compile_patterns, filter_streams, visible_indices};
use crate::history::History;
use crate::stream::{StreamRecord, StreamStatus};

/// Application mode/state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppMode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// Filter/search mode.
    Filter,
    /// Waiting for delete confirmation of the selected stream.
    ConfirmDelete,
    /// Help overlay.
    Help,
    /// Error display.
    Error { message: String },
}

/// What the TUI session produced.
#[derive(Debug)]
pub struct TuiOutcome {
    /// The catalog, possibly mutated by deletions or status changes.
    pub history: History,
    /// Stream chosen for playback, if any.
    pub play: Option<StreamRecord>,
    /// Whether the catalog was mutated and should be saved.
    pub dirty: bool,
}

/// Main application state.
pub struct App {
    // Data
    history: History,
    config: Config,
    exclude_patterns: Vec<Pattern>,

    // UI state
    mode: AppMode,
    selected: usize,
    filter_text: String,
    sort_mode: SortMode,

    // Computed (cached)
    visible_indices: Vec<usize>,

    // Exit state
    should_quit: bool,
    play_request: Option<StreamRecord>,
    dirty: bool,
}

impl App {
    /// Create a new application.
    pub fn new(history: History, config: Config) -> Self {
        let exclude_patterns = compile_patterns(&config.exclude.patterns);
        let sort_mode = config.general.default_sort;

        let mut app = Self {
            history,
            config,
            exclude_patterns,
            mode: AppMode::Normal,
            selected: 0,
            filter_text: String::new(),
            sort_mode,
            visible_indices: Vec::new(),
            should_quit: false,
            play_request: None,
            dirty: false,
        };
        app.update_visible();
        app
    }

    // ==================== Getters ====================

    /// Get the current mode.
    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the current filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Get the current sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Get the selected index within the visible list.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Number of streams after excludes and filtering.
    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Total number of streams in the catalog.
    pub fn total_count(&self) -> usize {
        self.history.len()
    }

    /// Get the config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Visible streams after excludes, filtering and sorting.
    pub fn visible_streams(&self) -> Vec<&StreamRecord> {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.history.streams().get(i))
            .collect()
    }

    /// The currently selected stream.
    pub fn selected_stream(&self) -> Option<&StreamRecord> {
        self.visible_indices
            .get(self.selected)
            .and_then(|&i| self.history.streams().get(i))
    }

    /// Consume the app, yielding the session outcome.
    pub fn into_outcome(self) -> TuiOutcome {
        TuiOutcome {
            history: self.history,
            play: self.play_request,
            dirty: self.dirty,
        }
    }

    // ==================== Mode transitions ====================

    /// Request application exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Enter filter mode.
    pub fn enter_filter(&mut self) {
        self.mode = AppMode::Filter;
    }

    /// Leave filter mode, keeping the query.
    pub fn apply_filter(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Leave filter mode and clear the query.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.mode = AppMode::Normal;
        self.update_visible();
    }

    /// Show the help overlay.
    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    /// Show an error message.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.mode = AppMode::Error {
            message: message.into(),
        };
    }

    /// Return to normal mode.
    pub fn dismiss_overlay(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ==================== Navigation ====================

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.visible_indices.is_empty() {
            self.selected = (self.selected + 1).min(self.visible_indices.len() - 1);
        }
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Jump to the first stream.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to the last stream.
    pub fn select_last(&mut self) {
        self.selected = self.visible_indices.len().saturating_sub(1);
    }

    // ==================== Filter editing ====================

    /// Append a character to the filter query.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected = 0;
        self.update_visible();
    }

    /// Remove the last character of the filter query.
    pub fn pop_filter_char(&mut self) {
        self.filter_text.pop();
        self.selected = 0;
        self.update_visible();
    }

    // ==================== Catalog mutation ====================

    /// Ask for confirmation before deleting the selected stream.
    pub fn request_delete(&mut self) {
        if self.selected_stream().is_some() {
            self.mode = AppMode::ConfirmDelete;
        }
    }

    /// Delete the selected stream after confirmation.
    pub fn confirm_delete(&mut self) {
        if let Some(name) = self.selected_stream().map(|s| s.name.clone()) {
            if self.history.remove(&name).is_some() {
                self.dirty = true;
            }
            self.update_visible();
            if self.selected >= self.visible_indices.len() {
                self.selected = self.visible_indices.len().saturating_sub(1);
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Abort a pending delete.
    pub fn cancel_delete(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Cycle the status of the selected stream.
    pub fn cycle_status(&mut self) {
        if let Some((name, status)) = self
            .selected_stream()
            .map(|s| (s.name.clone(), s.status.next()))
        {
            if self.history.set_status(&name, status) {
                self.dirty = true;
            }
            self.update_visible();
        }
    }

    /// Choose the selected stream for playback and exit.
    pub fn play_selected(&mut self) {
        if let Some(stream) = self.selected_stream().cloned() {
            self.play_request = Some(stream);
            self.should_quit = true;
        }
    }

    // ==================== Computation ====================

    /// Recompute visible indices after excludes, filter and sort.
    fn update_visible(&mut self) {
        let streams = self.history.streams();

        let not_excluded = visible_indices(
            streams.iter().map(|s| s.name.as_str()),
            &self.exclude_patterns,
        );

        let mut visible: Vec<usize> = if self.filter_text.is_empty() {
            not_excluded
        } else if self.config.filter.fuzzy {
            let candidates: Vec<StreamRecord> = not_excluded
                .iter()
                .map(|&i| streams[i].clone())
                .collect();
            filter_streams(
                &self.filter_text,
                &candidates,
                self.config.filter.search_urls,
            )
            .into_iter()
            .map(|(i, _)| not_excluded[i])
            .collect()
        } else {
            // Plain substring matching when fuzzy search is turned off
            let query = self.filter_text.to_lowercase();
            not_excluded
                .into_iter()
                .filter(|&i| {
                    streams[i].name.to_lowercase().contains(&query)
                        || (self.config.filter.search_urls
                            && streams[i].url.to_lowercase().contains(&query))
                })
                .collect()
        };

        match self.sort_mode {
            SortMode::Insertion => {}
            SortMode::Name => {
                visible.sort_by(|&a, &b| streams[a].name.cmp(&streams[b].name));
            }
            SortMode::Status => {
                visible.sort_by_key(|&i| match streams[i].status {
                    StreamStatus::Error => 0,
                    StreamStatus::Success => 1,
                    StreamStatus::Stopped => 2,
                });
            }
        }

        if self.config.general.max_items > 0 {
            visible.truncate(self.config.general.max_items);
        }

        self.visible_indices = visible;
    }
}
