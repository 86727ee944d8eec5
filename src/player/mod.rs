//! Player module for sth.
//!
//! Launches the configured external media player on a stream URL.

mod executor;

pub use executor::{
    format_dry_run_command, play_stream, ExecutionResult, EXIT_CODE_INTERRUPTED,
};
