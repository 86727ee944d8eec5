//! Color theme for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme as ThemeConfig;
use crate::stream::StreamStatus;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Header
    header_bg: Color,
    header_fg: Color,

    // Filter
    filter_fg: Color,
    filter_placeholder_fg: Color,

    // List
    name_fg: Color,
    url_fg: Color,
    selected_bg: Color,
    selected_fg: Color,
    relay_fg: Color,

    // Footer
    footer_fg: Color,
    key_fg: Color,

    // Status
    error_fg: Color,
    success_fg: Color,
    stopped_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&ThemeConfig::Default)
    }
}

impl Theme {
    /// Create a theme from configuration.
    pub fn new(config: &ThemeConfig) -> Self {
        match config {
            ThemeConfig::Default => Self::default_theme(),
            ThemeConfig::Minimal => Self::minimal_theme(),
            ThemeConfig::None => Self::no_color_theme(),
        }
    }

    /// Default full-color theme.
    fn default_theme() -> Self {
        Self {
            header_bg: Color::Blue,
            header_fg: Color::White,

            filter_fg: Color::Yellow,
            filter_placeholder_fg: Color::DarkGray,

            name_fg: Color::White,
            url_fg: Color::DarkGray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            relay_fg: Color::Magenta,

            footer_fg: Color::DarkGray,
            key_fg: Color::Cyan,

            error_fg: Color::Red,
            success_fg: Color::Green,
            stopped_fg: Color::Gray,
        }
    }

    /// Minimal color theme (fewer colors, less bold).
    fn minimal_theme() -> Self {
        Self {
            header_bg: Color::Reset,
            header_fg: Color::White,

            filter_fg: Color::White,
            filter_placeholder_fg: Color::DarkGray,

            name_fg: Color::White,
            url_fg: Color::DarkGray,
            selected_bg: Color::Reset,
            selected_fg: Color::Cyan,
            relay_fg: Color::White,

            footer_fg: Color::DarkGray,
            key_fg: Color::Gray,

            error_fg: Color::Red,
            success_fg: Color::Green,
            stopped_fg: Color::Gray,
        }
    }

    /// No-color theme (monochrome).
    fn no_color_theme() -> Self {
        Self {
            header_bg: Color::Reset,
            header_fg: Color::Reset,

            filter_fg: Color::Reset,
            filter_placeholder_fg: Color::Reset,

            name_fg: Color::Reset,
            url_fg: Color::Reset,
            selected_bg: Color::Reset,
            selected_fg: Color::Reset,
            relay_fg: Color::Reset,

            footer_fg: Color::Reset,
            key_fg: Color::Reset,

            error_fg: Color::Reset,
            success_fg: Color::Reset,
            stopped_fg: Color::Reset,
        }
    }

    // ==================== Styles ====================

    /// Header bar style.
    pub fn header(&self) -> Style {
        Style::default()
            .bg(self.header_bg)
            .fg(self.header_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Filter input style.
    pub fn filter(&self) -> Style {
        Style::default().fg(self.filter_fg)
    }

    /// Filter placeholder style.
    pub fn filter_placeholder(&self) -> Style {
        Style::default().fg(self.filter_placeholder_fg)
    }

    /// Stream name style.
    pub fn name(&self) -> Style {
        Style::default().fg(self.name_fg)
    }

    /// URL style.
    pub fn url(&self) -> Style {
        Style::default().fg(self.url_fg)
    }

    /// Selected row style.
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selected_bg)
            .fg(self.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Relay marker style.
    pub fn relay(&self) -> Style {
        Style::default().fg(self.relay_fg)
    }

    /// Footer text style.
    pub fn footer(&self) -> Style {
        Style::default().fg(self.footer_fg)
    }

    /// Key hint style.
    pub fn key(&self) -> Style {
        Style::default().fg(self.key_fg).add_modifier(Modifier::BOLD)
    }

    /// Style for a stream status.
    pub fn status(&self, status: StreamStatus) -> Style {
        let fg = match status {
            StreamStatus::Error => self.error_fg,
            StreamStatus::Success => self.success_fg,
            StreamStatus::Stopped => self.stopped_fg,
        };
        Style::default().fg(fg)
    }

    /// Error message style.
    pub fn error(&self) -> Style {
        Style::default().fg(self.error_fg).add_modifier(Modifier::BOLD)
    }
}

/// Status icon for list rows.
pub fn status_icon(status: StreamStatus, icons: bool) -> &'static str {
    if !icons {
        return " ";
    }
    match status {
        StreamStatus::Stopped => "○",
        StreamStatus::Success => "●",
        StreamStatus::Error => "✗",
    }
}
