//! Configuration module for sth.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (highest priority)
//! - Project-level `.sthrc.toml` in the current directory
//! - User-level `~/.config/sth/config.toml`

pub mod file;
mod types;

pub use file::{generate_example_config, load_config};
pub use types::{
    AppearanceConfig, Config, ExcludeConfig, FilterConfig, GeneralConfig, PlayerConfig,
    RelayConfig, SortMode, StoreConfig, Theme,
};
