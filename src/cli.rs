//! CLI argument definitions for sth.
//!
//! Uses clap with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::config::SortMode;
use crate::stream::StreamStatus;

/// Fast interactive TUI for managing live stream source history.
#[derive(Parser, Debug)]
#[command(name = "sth")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    /// Subcommand to run; with none, the interactive TUI opens
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the history file (overrides config)
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,

    /// Print a commented example config file and exit
    #[arg(long)]
    pub init_config: bool,
}

/// Subcommands for non-interactive use.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new stream source
    Add {
        /// Stream name (must be unique)
        name: String,

        /// Stream source URL
        url: String,

        /// Re-publish through the relay; playback URL is derived from the name
        #[arg(short, long)]
        relay: bool,

        /// Opaque identifier for the record (defaults to the name)
        #[arg(short, long, value_name = "KEY")]
        key: Option<String>,

        /// Initial status
        #[arg(short, long, value_enum)]
        status: Option<StreamStatus>,
    },

    /// List recorded streams
    List {
        /// Fuzzy filter query
        #[arg(short, long, value_name = "QUERY")]
        filter: Option<String>,

        /// Only show streams with this status
        #[arg(long, value_enum)]
        status: Option<StreamStatus>,

        /// Sort mode
        #[arg(short, long, value_name = "MODE", value_enum)]
        sort: Option<CliSortMode>,

        /// Show streams hidden by exclude patterns too
        #[arg(long)]
        no_exclude: bool,
    },

    /// Show one stream in detail
    Show {
        /// Stream name
        name: String,
    },

    /// Remove a stream by name
    Remove {
        /// Stream name
        name: String,
    },

    /// Update the status of a stream
    SetStatus {
        /// Stream name
        name: String,

        /// New status
        #[arg(value_enum)]
        status: StreamStatus,
    },

    /// Launch the configured player on a stream
    Play {
        /// Stream name
        name: String,

        /// Override the player command
        #[arg(short, long, value_name = "COMMAND")]
        player: Option<String>,

        /// Show the command without executing
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Replace or merge the catalog from a file
    Import {
        /// File to read (JSON or YAML)
        file: PathBuf,

        /// Add records one by one instead of replacing, skipping duplicates
        #[arg(short, long)]
        merge: bool,

        /// File format (default: inferred from the extension)
        #[arg(long, value_enum)]
        format: Option<CliFormat>,
    },

    /// Write the catalog to a file or stdout
    Export {
        /// File to write (stdout when omitted)
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<CliFormat>,
    },
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Sort mode for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSortMode {
    /// Keep catalog insertion order.
    Insertion,
    /// Sort alphabetically.
    Name,
    /// Group by status.
    Status,
}

impl From<CliSortMode> for SortMode {
    fn from(mode: CliSortMode) -> Self {
        match mode {
            CliSortMode::Insertion => SortMode::Insertion,
            CliSortMode::Name => SortMode::Name,
            CliSortMode::Status => SortMode::Status,
        }
    }
}

/// Import/export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliFormat {
    /// JSON, the store's native format.
    Json,
    /// YAML.
    Yaml,
}

impl CliFormat {
    /// Infer the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => CliFormat::Yaml,
            _ => CliFormat::Json,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the working directory for local config lookup.
    pub fn working_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Check if the TUI should be shown.
    pub fn should_show_tui(&self) -> bool {
        self.command.is_none() && self.completions.is_none() && !self.init_config
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "sth", &mut std::io::stdout());
    }
}
