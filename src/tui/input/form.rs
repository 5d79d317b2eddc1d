use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

use super::*;

pub(super) fn handle_form(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Tab => match app.form.draft.focus.next() {
            Some(field) => app.form.draft.focus = field,
            None => leave_form(app),
        },
        KeyCode::BackTab => match app.form.draft.focus.prev() {
            Some(field) => app.form.draft.focus = field,
            None => leave_form(app),
        },
        KeyCode::Esc => leave_form(app),
        KeyCode::Enter => app.submit_form(now),
        _ => {
            // Input is locked while the create request is in flight
            if !app.form.loading {
                edit_text(app.form.draft.focused_mut(), key);
            }
        }
    }
}

fn leave_form(app: &mut App) {
    app.form.draft.focus = Default::default();
    app.focus = Focus::Table;
}
