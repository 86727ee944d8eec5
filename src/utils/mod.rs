//! Path and terminal utilities.

mod paths;
mod terminal;

pub use paths::{config_dir, global_config_file, history_file, local_config_file};
pub use terminal::{ensure_terminal_size, MIN_HEIGHT, MIN_WIDTH};
