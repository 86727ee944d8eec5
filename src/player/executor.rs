//! External player execution.
//!
//! The player command comes from configuration (or `--player`), is split
//! shell-style, and gets the stream URL appended as its final argument.

use std::process::{Command, ExitStatus, Stdio};

use anyhow::{bail, Context, Result};

use crate::stream::StreamRecord;

/// Exit code when interrupted by Ctrl+C (SIGINT).
/// On Unix, this is 128 + signal number (SIGINT = 2).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Result of a player invocation.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Exit status of the player process.
    pub status: ExitStatus,
    /// The command that was executed.
    pub command: String,
}

impl ExecutionResult {
    /// Check if the player exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get the exit code.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Launch the player on a stream's playback URL.
///
/// The player inherits stdio so interactive controls keep working.
/// With `dry_run` the command is printed instead of executed.
///
/// # Errors
///
/// Returns an error if the player command is empty, cannot be parsed, or
/// fails to spawn.
pub fn play_stream(
    player_command: &str,
    stream: &StreamRecord,
    dry_run: bool,
) -> Result<ExecutionResult> {
    let mut parts = shell_words::split(player_command)
        .with_context(|| format!("Failed to parse player command '{player_command}'"))?;

    if parts.is_empty() {
        bail!("Player command is empty");
    }

    parts.push(stream.url.clone());
    let command_str = parts.join(" ");

    if dry_run {
        println!("Would run: {command_str}");
        return Ok(ExecutionResult {
            status: ExitStatus::default(),
            command: command_str,
        });
    }

    let mut command = Command::new(&parts[0]);
    command.args(&parts[1..]);

    // Inherit stdio so player hotkeys keep working
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    let status = command
        .status()
        .with_context(|| format!("Failed to execute: {command_str}"))?;

    Ok(ExecutionResult {
        status,
        command: command_str,
    })
}

/// Format a player command for display in dry-run mode.
pub fn format_dry_run_command(player_command: &str, stream: &StreamRecord) -> String {
    let mut parts = shell_words::split(player_command)
        .unwrap_or_else(|_| vec![player_command.to_string()]);
    parts.push(stream.url.clone());
    format!("Would run: {}", parts.join(" "))
}
