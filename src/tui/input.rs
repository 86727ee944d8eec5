//! Keyboard input handling for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, AppMode};

/// Handle a terminal event, updating the application state.
pub fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key) = event {
        // Ignore release events (Windows terminals send both).
        if key.kind == KeyEventKind::Release {
            return;
        }
        handle_key(app, key);
    }
}

/// Dispatch a key press according to the current mode.
fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from any mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.mode().clone() {
        AppMode::Normal => handle_normal_key(app, key),
        AppMode::Filter => handle_filter_key(app, key),
        AppMode::ConfirmDelete => handle_confirm_key(app, key),
        AppMode::Help | AppMode::Error { .. } => app.dismiss_overlay(),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('/') => app.enter_filter(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('s') => app.cycle_status(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Enter => app.apply_filter(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Up => {
            app.select_prev();
        }
        KeyCode::Char(c) => app.push_filter_char(c),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        _ => app.cancel_delete(),
    }
}
