//! Main UI rendering and TUI loop.

use std::io::{self, stdout, Stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use super::app::{App, AppMode, TuiOutcome};
use super::input::handle_event;
use super::theme::{status_icon, Theme};
use crate::stream::hls_url;
use crate::utils::ensure_terminal_size;

/// Event poll interval.
const POLL_INTERVAL_MS: u64 = 100;

/// Global flag to track if terminal is in raw mode.
static TERMINAL_RAW_MODE: AtomicBool = AtomicBool::new(false);

/// RAII guard for terminal state.
/// Ensures terminal is properly restored even on panic.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    /// Create a new terminal guard, setting up the terminal for TUI.
    pub fn new() -> Result<Self> {
        // Set up panic hook before entering raw mode
        setup_panic_hook();

        enable_raw_mode().context("Failed to enable raw mode")?;
        TERMINAL_RAW_MODE.store(true, Ordering::SeqCst);

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal })
    }

    /// Get a mutable reference to the terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        TERMINAL_RAW_MODE.store(false, Ordering::SeqCst);
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
    }
}

/// Set up a panic hook that restores the terminal.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if TERMINAL_RAW_MODE.load(Ordering::SeqCst) {
            let _ = disable_raw_mode();
            let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
        }

        original_hook(panic_info);
    }));
}

/// Restore terminal to normal state.
/// Call this before running external commands.
pub fn restore_terminal() -> Result<()> {
    if TERMINAL_RAW_MODE.load(Ordering::SeqCst) {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(stdout(), LeaveAlternateScreen, cursor::Show)
            .context("Failed to leave alternate screen")?;
        TERMINAL_RAW_MODE.store(false, Ordering::SeqCst);
    }
    io::stdout().flush()?;
    Ok(())
}

/// Run the TUI application.
///
/// Returns the session outcome: the (possibly mutated) catalog and an
/// optional stream to play after the terminal is restored.
pub fn run_tui(mut app: App) -> Result<TuiOutcome> {
    ensure_terminal_size()?;

    let mut guard = TerminalGuard::new()?;

    let result = run_loop(guard.terminal(), &mut app);

    // Guard restores the terminal on drop
    drop(guard);

    result?;

    Ok(app.into_outcome())
}

/// Main TUI loop.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let theme = Theme::new(&app.config().appearance.theme);
    let mut list_state = ListState::default();

    loop {
        list_state.select(if app.visible_count() == 0 {
            None
        } else {
            Some(app.selected_index())
        });

        terminal
            .draw(|frame| render(frame, app, &theme, &mut list_state))
            .context("Failed to draw frame")?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            let ev = event::read()?;
            handle_event(app, ev);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Render one frame.
fn render(frame: &mut Frame, app: &App, theme: &Theme, list_state: &mut ListState) {
    let appearance = &app.config().appearance;
    let show_filter = *app.mode() == AppMode::Filter || !app.filter_text().is_empty();
    let show_detail =
        app.config().general.show_url_preview && !appearance.compact && app.selected_stream().is_some();

    let mut constraints = vec![Constraint::Length(1)];
    if show_filter {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(1));
    if show_detail {
        constraints.push(Constraint::Length(6));
    }
    if appearance.show_footer {
        constraints.push(Constraint::Length(1));
    }

    let areas = Layout::vertical(constraints).split(frame.area());
    let mut next = 0;

    render_header(frame, areas[next], app, theme);
    next += 1;

    if show_filter {
        render_filter(frame, areas[next], app, theme);
        next += 1;
    }

    render_list(frame, areas[next], app, theme, list_state);
    next += 1;

    if show_detail {
        render_detail(frame, areas[next], app, theme);
        next += 1;
    }

    if appearance.show_footer {
        render_footer(frame, areas[next], app, theme);
    }

    match app.mode() {
        AppMode::Help => render_help(frame, theme),
        AppMode::Error { message } => render_error(frame, theme, message),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = format!(
        " sth — stream history  ({}/{} streams)",
        app.visible_count(),
        app.total_count()
    );
    frame.render_widget(Paragraph::new(title).style(theme.header()), area);
}

fn render_filter(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = if app.filter_text().is_empty() {
        Line::from(vec![
            Span::styled(" / ", theme.filter()),
            Span::styled("type to filter...", theme.filter_placeholder()),
        ])
    } else {
        Line::from(vec![
            Span::styled(" / ", theme.filter()),
            Span::styled(app.filter_text().to_string(), theme.filter()),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, state: &mut ListState) {
    let streams = app.visible_streams();

    if streams.is_empty() {
        let message = if app.filter_text().is_empty() {
            "No streams recorded yet.\n\nAdd one with: sth add <name> <url>".to_string()
        } else {
            format!("No streams match '{}'", app.filter_text())
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.url())
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let icons = app.config().appearance.icons;
    let compact = app.config().appearance.compact;

    let items: Vec<ListItem> = streams
        .iter()
        .map(|stream| {
            let mut spans = vec![
                Span::styled(status_icon(stream.status, icons), theme.status(stream.status)),
                Span::raw(" "),
                Span::styled(stream.name.clone(), theme.name()),
            ];
            if stream.relay {
                spans.push(Span::raw(" "));
                spans.push(Span::styled("[relay]", theme.relay()));
            }
            if !compact {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(stream.url.clone(), theme.url()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.selected())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, state);
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(stream) = app.selected_stream() else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("status: ", theme.url()),
            Span::styled(stream.status.to_string(), theme.status(stream.status)),
        ]),
        Line::from(vec![
            Span::styled("url:    ", theme.url()),
            Span::styled(stream.url.clone(), theme.name()),
        ]),
        Line::from(vec![
            Span::styled("origin: ", theme.url()),
            Span::styled(stream.origin_url.clone(), theme.name()),
        ]),
    ];
    if stream.relay {
        lines.push(Line::from(vec![
            Span::styled("hls:    ", theme.url()),
            Span::styled(
                hls_url(&app.config().relay.hls_base, &stream.name),
                theme.name(),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", stream.name));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match app.mode() {
        AppMode::ConfirmDelete => {
            let name = app
                .selected_stream()
                .map(|s| s.name.as_str())
                .unwrap_or("");
            Line::from(Span::styled(
                format!(" Delete '{}'? [y/N]", name),
                theme.error(),
            ))
        }
        AppMode::Filter => Line::from(vec![
            Span::styled(" Enter", theme.key()),
            Span::styled(" apply  ", theme.footer()),
            Span::styled("Esc", theme.key()),
            Span::styled(" clear", theme.footer()),
        ]),
        _ => Line::from(vec![
            Span::styled(" ↑↓", theme.key()),
            Span::styled(" move  ", theme.footer()),
            Span::styled("/", theme.key()),
            Span::styled(" filter  ", theme.footer()),
            Span::styled("Enter", theme.key()),
            Span::styled(" play  ", theme.footer()),
            Span::styled("s", theme.key()),
            Span::styled(" status  ", theme.footer()),
            Span::styled("d", theme.key()),
            Span::styled(" delete  ", theme.footer()),
            Span::styled("?", theme.key()),
            Span::styled(" help  ", theme.footer()),
            Span::styled("q", theme.key()),
            Span::styled(" quit", theme.footer()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect_fixed(44, 14, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        help_line(theme, "↑/k, ↓/j", "move selection"),
        help_line(theme, "g / G", "first / last"),
        help_line(theme, "/", "filter streams"),
        help_line(theme, "Enter", "play selected stream"),
        help_line(theme, "s", "cycle status"),
        help_line(theme, "d", "delete (asks to confirm)"),
        help_line(theme, "?", "toggle this help"),
        help_line(theme, "q / Esc", "quit"),
        Line::from(""),
        Line::from(Span::styled("  press any key to close", theme.footer())),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Help ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn help_line(theme: &Theme, keys: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", keys), theme.key()),
        Span::styled(text.to_string(), theme.footer()),
    ])
}

fn render_error(frame: &mut Frame, theme: &Theme, message: &str) {
    let area = centered_rect_fixed(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title(" Error ");
    frame.render_widget(
        Paragraph::new(message.to_string())
            .style(theme.error())
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// A fixed-size rectangle centered within `area`, clamped to it.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
