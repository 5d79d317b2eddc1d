mod common;
mod confirm;
mod edit;
mod form;
mod navigate;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Submodules reach shared helpers via `use super::*;`
#[allow(unused_imports)]
use common::*;
use confirm::handle_confirm;
use edit::handle_edit;
use form::handle_form;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows everything until closed
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.mode() {
        Mode::Form => handle_form(app, key, now),
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key, now),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a bracketed paste: text goes into whichever field has focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode() {
        Mode::Form if !app.form.loading => {
            app.form.draft.focused_mut().insert_str(text);
        }
        Mode::Edit => {
            if let Some(row) = app.selected_row_mut()
                && !row.loading
                && let Some(editor) = row.editor.as_mut()
            {
                editor.focused_mut().insert_str(text);
            }
        }
        _ => {}
    }
}
