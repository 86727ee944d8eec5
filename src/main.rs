//! sth - Stream History
//!
//! Entry point for the sth CLI application.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use stream_history::cli::{Cli, CliFormat, Command};
use stream_history::config::{generate_example_config, load_config, Config, SortMode};
use stream_history::error::{exit_code, SthError};
use stream_history::filter::{compile_patterns, filter_streams, is_excluded};
use stream_history::history::{AddOutcome, History};
use stream_history::player::play_stream;
use stream_history::stream::{
    hls_url, is_known_scheme, playback_url, url_scheme, StreamRecord, StreamStatus,
};
use stream_history::tui::{run_tui, App};
use stream_history::utils::{global_config_file, history_file, local_config_file};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Check if it's one of our custom errors with good formatting
            if let Some(sth_err) = err.downcast_ref::<SthError>() {
                eprintln!("Error: {sth_err}");
                return ExitCode::from(sth_err.exit_code() as u8);
            }
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code::GENERAL_ERROR as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    // Handle shell completions early
    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    if cli.init_config {
        print!("{}", generate_example_config());
        return Ok(exit_code::SUCCESS);
    }

    if cli.debug {
        print_debug_header();
        eprintln!("Debug: CLI arguments = {cli:#?}");
    }

    let working_dir = cli.working_dir();

    // Load and merge config
    let config = if cli.no_config {
        Config::default()
    } else {
        load_config(cli.config.as_deref(), &working_dir).map_err(|e| SthError::InvalidConfig {
            path: cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from("<config>")),
            message: format!("{e:#}"),
        })?
    };

    // Resolve the history file: --store beats config, config beats default
    let store_path = cli
        .store
        .clone()
        .or_else(|| config.store.path.clone())
        .or_else(history_file)
        .context("Could not determine config directory")?;

    if cli.debug {
        print_debug_paths(&store_path, &working_dir);
    }

    let mut history = History::load_from(&store_path)?;

    if cli.debug {
        eprintln!("Debug: {} streams loaded", history.len());
        eprintln!();
    }

    match cli.command {
        Some(Command::Add {
            name,
            url,
            relay,
            key,
            status,
        }) => cmd_add(
            &mut history,
            &config,
            &store_path,
            name,
            url,
            relay,
            key,
            status,
        ),
        Some(Command::List {
            filter,
            status,
            sort,
            no_exclude,
        }) => cmd_list(
            &history,
            &config,
            filter.as_deref(),
            status,
            sort.map(Into::into),
            no_exclude,
        ),
        Some(Command::Show { name }) => cmd_show(&history, &config, &name),
        Some(Command::Remove { name }) => cmd_remove(&mut history, &store_path, &name),
        Some(Command::SetStatus { name, status }) => {
            cmd_set_status(&mut history, &store_path, &name, status)
        }
        Some(Command::Play {
            name,
            player,
            dry_run,
        }) => cmd_play(
            &mut history,
            &config,
            &store_path,
            &name,
            player.as_deref(),
            dry_run,
        ),
        Some(Command::Import {
            file,
            merge,
            format,
        }) => cmd_import(&mut history, &store_path, &file, merge, format),
        Some(Command::Export { file, format }) => cmd_export(&history, file.as_deref(), format),
        None => run_interactive(history, config, &store_path),
    }
}

// ==================== Subcommands ====================

#[allow(clippy::too_many_arguments)]
fn cmd_add(
    history: &mut History,
    config: &Config,
    store_path: &Path,
    name: String,
    url: String,
    relay: bool,
    key: Option<String>,
    status: Option<StreamStatus>,
) -> Result<i32> {
    match url_scheme(&url) {
        None => {
            return Err(SthError::InvalidUrl { url }.into());
        }
        Some(scheme) if !is_known_scheme(scheme) => {
            eprintln!("Warning: Unrecognized URL scheme '{scheme}', recording anyway");
        }
        Some(_) => {}
    }

    let mut record = if relay {
        let playback = playback_url(&config.relay.rtsp_base, &name);
        StreamRecord::relayed(name.clone(), url, playback)
    } else {
        StreamRecord::direct(name.clone(), url)
    };
    if let Some(key) = key {
        record = record.with_key(key);
    }
    if let Some(status) = status {
        record = record.with_status(status);
    }

    let playback = record.url.clone();

    match history.add(record) {
        AddOutcome::Added => {
            history.cleanup(config.store.max_entries);
            history
                .save_to(store_path)
                .context("Failed to save history")?;

            println!("Recorded stream '{name}'");
            if relay {
                println!("  playback: {playback}");
                println!("  hls:      {}", hls_url(&config.relay.hls_base, &name));
            }
            Ok(exit_code::SUCCESS)
        }
        AddOutcome::DuplicateName => Err(SthError::DuplicateName { name }.into()),
    }
}

fn cmd_list(
    history: &History,
    config: &Config,
    filter: Option<&str>,
    status: Option<StreamStatus>,
    sort: Option<SortMode>,
    no_exclude: bool,
) -> Result<i32> {
    let patterns = if no_exclude {
        Vec::new()
    } else {
        compile_patterns(&config.exclude.patterns)
    };

    let mut indices: Vec<usize> = history
        .streams()
        .iter()
        .enumerate()
        .filter(|(_, s)| !is_excluded(&s.name, &patterns))
        .filter(|(_, s)| status.map_or(true, |wanted| s.status == wanted))
        .map(|(i, _)| i)
        .collect();

    if let Some(query) = filter {
        let candidates: Vec<StreamRecord> = indices
            .iter()
            .map(|&i| history.streams()[i].clone())
            .collect();
        indices = filter_streams(query, &candidates, config.filter.search_urls)
            .into_iter()
            .map(|(i, _)| indices[i])
            .collect();
    }

    match sort.unwrap_or(config.general.default_sort) {
        SortMode::Insertion => {}
        SortMode::Name => {
            indices.sort_by(|&a, &b| history.streams()[a].name.cmp(&history.streams()[b].name));
        }
        SortMode::Status => {
            indices.sort_by_key(|&i| match history.streams()[i].status {
                StreamStatus::Error => 0,
                StreamStatus::Success => 1,
                StreamStatus::Stopped => 2,
            });
        }
    }

    if config.general.max_items > 0 {
        indices.truncate(config.general.max_items);
    }

    let use_colors = io::stdout().is_terminal();

    if use_colors {
        println!("\x1b[1;36mRecorded streams:\x1b[0m");
    } else {
        println!("Recorded streams:");
    }
    println!();

    let max_name_len = indices
        .iter()
        .map(|&i| history.streams()[i].name.len())
        .max()
        .unwrap_or(0)
        .min(30);

    for &i in &indices {
        let stream = &history.streams()[i];
        let relay_marker = if stream.relay { " [relay]" } else { "" };

        if use_colors {
            let status_color = match stream.status {
                StreamStatus::Stopped => "\x1b[2m",
                StreamStatus::Success => "\x1b[1;32m",
                StreamStatus::Error => "\x1b[1;31m",
            };
            print!("  \x1b[1;32m{:width$}\x1b[0m", stream.name, width = max_name_len);
            print!("  {}{:7}\x1b[0m", status_color, stream.status);
            print!("  \x1b[2m{}\x1b[0m", truncate_string(&stream.url, 50));
            print!("\x1b[35m{relay_marker}\x1b[0m");
        } else {
            print!("  {:width$}", stream.name, width = max_name_len);
            print!("  {:7}", stream.status);
            print!("  {}", truncate_string(&stream.url, 50));
            print!("{relay_marker}");
        }
        println!();
    }

    println!();
    if use_colors {
        println!("\x1b[2m{} streams found\x1b[0m", indices.len());
    } else {
        println!("{} streams found", indices.len());
    }

    Ok(exit_code::SUCCESS)
}

fn cmd_show(history: &History, config: &Config, name: &str) -> Result<i32> {
    let stream = history
        .get(name)
        .ok_or_else(|| SthError::stream_not_found_with_suggestions(name, &history.names()))?;

    println!("name:    {}", stream.name);
    println!("key:     {}", stream.key);
    println!("status:  {}", stream.status);
    println!("relay:   {}", stream.relay);
    println!("url:     {}", stream.url);
    println!("origin:  {}", stream.origin_url);
    if stream.relay {
        println!("hls:     {}", hls_url(&config.relay.hls_base, &stream.name));
    }

    Ok(exit_code::SUCCESS)
}

fn cmd_remove(history: &mut History, store_path: &Path, name: &str) -> Result<i32> {
    match history.remove(name) {
        Some(removed) => {
            history
                .save_to(store_path)
                .context("Failed to save history")?;
            println!("Removed stream '{}'", removed.name);
            Ok(exit_code::SUCCESS)
        }
        None => {
            Err(SthError::stream_not_found_with_suggestions(name, &history.names()).into())
        }
    }
}

fn cmd_set_status(
    history: &mut History,
    store_path: &Path,
    name: &str,
    status: StreamStatus,
) -> Result<i32> {
    if !history.set_status(name, status) {
        return Err(SthError::stream_not_found_with_suggestions(name, &history.names()).into());
    }

    history
        .save_to(store_path)
        .context("Failed to save history")?;
    println!("Stream '{name}' marked {status}");
    Ok(exit_code::SUCCESS)
}

fn cmd_play(
    history: &mut History,
    config: &Config,
    store_path: &Path,
    name: &str,
    player_override: Option<&str>,
    dry_run: bool,
) -> Result<i32> {
    let stream = history
        .get(name)
        .cloned()
        .ok_or_else(|| SthError::stream_not_found_with_suggestions(name, &history.names()))?;

    let player = player_override.unwrap_or(&config.player.command);
    if player.trim().is_empty() {
        return Err(SthError::NoPlayer.into());
    }

    eprintln!("Playing: {}", stream.url);
    let result = play_stream(player, &stream, dry_run)?;

    if dry_run {
        return Ok(exit_code::SUCCESS);
    }

    let code = result.code().unwrap_or(exit_code::INTERRUPTED);

    // Record the session outcome like the relay server reports it:
    // a clean exit is a success, anything else an error.
    let outcome = if code == 0 {
        StreamStatus::Success
    } else {
        StreamStatus::Error
    };
    history.set_status(name, outcome);
    history
        .save_to(store_path)
        .context("Failed to save history")?;

    if code != 0 && code != exit_code::INTERRUPTED {
        return Err(SthError::PlayerFailed {
            command: result.command,
            code,
        }
        .into());
    }

    Ok(exit_code::SUCCESS)
}

fn cmd_import(
    history: &mut History,
    store_path: &Path,
    file: &Path,
    merge: bool,
    format: Option<CliFormat>,
) -> Result<i32> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| SthError::IoWithContext {
            operation: "read".to_string(),
            path: file.to_path_buf(),
            source: e,
        })?;

    let format = format.unwrap_or_else(|| CliFormat::from_path(file));
    let records = parse_stream_list(&content, format)?;

    let total = records.len();
    if merge {
        let mut skipped = 0usize;
        for record in records {
            let name = record.name.clone();
            if let AddOutcome::DuplicateName = history.add(record) {
                eprintln!("Warning: Skipping '{name}': ensure the stream name is unique");
                skipped += 1;
            }
        }
        history
            .save_to(store_path)
            .context("Failed to save history")?;
        println!("Imported {} streams ({} skipped)", total - skipped, skipped);
    } else {
        history.replace_all(records);
        history
            .save_to(store_path)
            .context("Failed to save history")?;
        println!("Imported {total} streams");
    }

    Ok(exit_code::SUCCESS)
}

fn cmd_export(history: &History, file: Option<&Path>, format: Option<CliFormat>) -> Result<i32> {
    let format = format.unwrap_or_else(|| {
        file.map(CliFormat::from_path).unwrap_or(CliFormat::Json)
    });

    let content = match format {
        CliFormat::Json => {
            let mut s = serde_json::to_string_pretty(history.streams())
                .context("Failed to serialize streams")?;
            s.push('\n');
            s
        }
        CliFormat::Yaml => {
            serde_yaml::to_string(history.streams()).context("Failed to serialize streams")?
        }
    };

    match file {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| SthError::IoWithContext {
                operation: "write".to_string(),
                path: path.to_path_buf(),
                source: e,
            })?;
            println!("Exported {} streams to {}", history.len(), path.display());
        }
        None => {
            io::stdout().write_all(content.as_bytes())?;
        }
    }

    Ok(exit_code::SUCCESS)
}

/// Parse an imported stream list: either a bare record array or a full
/// history file.
fn parse_stream_list(content: &str, format: CliFormat) -> Result<Vec<StreamRecord>> {
    match format {
        CliFormat::Json => {
            if let Ok(records) = serde_json::from_str::<Vec<StreamRecord>>(content) {
                return Ok(records);
            }
            let history: History = serde_json::from_str(content).map_err(SthError::from)?;
            Ok(history.streams().to_vec())
        }
        CliFormat::Yaml => {
            if let Ok(records) = serde_yaml::from_str::<Vec<StreamRecord>>(content) {
                return Ok(records);
            }
            let history: History = serde_yaml::from_str(content).map_err(SthError::from)?;
            Ok(history.streams().to_vec())
        }
    }
}

// ==================== Interactive mode ====================

fn run_interactive(history: History, config: Config, store_path: &Path) -> Result<i32> {
    let player_command = config.player.command.clone();
    let app = App::new(history, config);

    let mut outcome = run_tui(app).context("TUI error")?;

    if outcome.dirty {
        outcome
            .history
            .save_to(store_path)
            .context("Failed to save history")?;
    }

    if let Some(stream) = outcome.play {
        if player_command.trim().is_empty() {
            return Err(SthError::NoPlayer.into());
        }
        eprintln!("Playing: {}", stream.url);
        let result = play_stream(&player_command, &stream, false)?;
        let code = result.code().unwrap_or(exit_code::INTERRUPTED);

        let status = if code == 0 {
            StreamStatus::Success
        } else {
            StreamStatus::Error
        };
        outcome.history.set_status(&stream.name, status);
        outcome
            .history
            .save_to(store_path)
            .context("Failed to save history")?;

        if code != 0 && code != exit_code::INTERRUPTED {
            return Err(SthError::PlayerFailed {
                command: result.command,
                code,
            }
            .into());
        }
    }

    Ok(exit_code::SUCCESS)
}

// ==================== Helpers ====================

/// Truncate a string to a maximum length, adding ellipsis if needed.
/// Handles Unicode characters properly.
fn truncate_string(s: &str, max_len: usize) -> String {
    if max_len < 4 {
        return s.chars().take(max_len).collect();
    }

    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

// ==================== Debug Functions ====================

/// Print debug header with version info.
fn print_debug_header() {
    eprintln!("=== sth debug mode ===");
    eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
    eprintln!();
}

/// Print debug information about file paths.
fn print_debug_paths(store_path: &Path, working_dir: &Path) {
    eprintln!("Debug: File locations:");

    eprintln!(
        "  History file: {} (exists: {})",
        store_path.display(),
        store_path.exists()
    );

    if let Some(cfg) = global_config_file() {
        let exists = cfg.exists();
        eprintln!("  Global config: {} (exists: {})", cfg.display(), exists);
    } else {
        eprintln!("  Global config: <not available>");
    }

    if let Some(cfg) = local_config_file(working_dir) {
        eprintln!("  Local config: {} (exists: true)", cfg.display());
    } else {
        eprintln!(
            "  Local config: {}/.sthrc.toml (exists: false)",
            working_dir.display()
        );
    }

    eprintln!();
}
