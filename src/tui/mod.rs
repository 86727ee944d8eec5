//! TUI module for sth.
//!
//! Provides the interactive terminal interface for browsing the stream
//! catalog.

mod app;
mod input;
mod theme;
mod ui;

pub use app::{App, AppMode, TuiOutcome};
pub use input::handle_event;
pub use theme::Theme;
pub use ui::{restore_terminal, run_tui, TerminalGuard};
