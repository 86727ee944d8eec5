//! Terminal utilities.

use crate::error::SthError;

/// Minimum terminal width for the TUI.
pub const MIN_WIDTH: u16 = 40;

/// Minimum terminal height for the TUI.
pub const MIN_HEIGHT: u16 = 10;

/// Check that the terminal is big enough for the TUI.
pub fn ensure_terminal_size() -> Result<(), SthError> {
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(SthError::TerminalTooSmall {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    Ok(())
}
