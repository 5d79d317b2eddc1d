use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::*;

/// Keys while the selected row is in inline edit mode
pub(super) fn handle_edit(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Enter => app.save_edit(now),
        KeyCode::Esc => app.cancel_edit(),
        _ => {
            let Some(row) = app.selected_row_mut() else {
                return;
            };
            if row.loading {
                return;
            }
            let Some(editor) = row.editor.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Tab => editor.cycle_focus(),
                KeyCode::BackTab => {
                    editor.focus = editor
                        .focus
                        .prev()
                        .unwrap_or(crate::tui::form::Field::DueDate);
                }
                _ => {
                    edit_text(editor.focused_mut(), key);
                }
            }
        }
    }
}
