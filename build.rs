//! Build script for sth.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "sth")]
#[command(
    author,
    version,
    about = "Fast interactive TUI for managing live stream source history"
)]
#[command(
    long_about = "sth keeps a persisted catalog of live stream sources (RTSP/RTMP/HLS) \
    with unique names, and lets you browse it interactively or script it.\n\n\
    Run without arguments to launch the interactive TUI. Use arrow keys to navigate, \
    / to filter, Enter to play the selected stream."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the history file (overrides config)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Print a commented example config file and exit
    #[arg(long)]
    init_config: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new stream source
    Add {
        name: String,
        url: String,
        #[arg(short, long)]
        relay: bool,
    },
    /// List recorded streams
    List,
    /// Show one stream in detail
    Show { name: String },
    /// Remove a stream by name
    Remove { name: String },
    /// Update the status of a stream
    SetStatus { name: String, status: String },
    /// Launch the configured player on a stream
    Play { name: String },
    /// Replace or merge the catalog from a file
    Import { file: PathBuf },
    /// Write the catalog to a file or stdout
    Export { file: Option<PathBuf> },
}

fn main() {
    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("STH_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to generate man page");

    // Write to the build output directory
    let man_path = out_dir.join("sth.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    // Also copy to docs directory for distribution
    let docs_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join("docs");
    if docs_dir.exists() {
        let _ = fs::copy(&man_path, docs_dir.join("sth.1"));
    }

    println!("cargo:rerun-if-changed=build.rs");
}
