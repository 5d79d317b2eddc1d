use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    if !app.table_shown() {
        // Loading or error screen: only reload, focus, help and quit
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('n') => app.focus = Focus::Form,
            KeyCode::Char('r') => app.start_load(),
            KeyCode::Char('?') => app.show_help = true,
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.store.tasks().len().saturating_sub(1);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('n') => app.focus = Focus::Form,
        KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('c') => app.complete_selected(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('r') => app.start_load(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}
