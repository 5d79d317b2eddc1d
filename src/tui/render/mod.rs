pub mod form_view;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod status_row;
pub mod table_view;
#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::util::dates;

use super::app::App;

/// Main render function: header, form, task table, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                      // title + separator
            Constraint::Length(form_view::FORM_HEIGHT), // new task form
            Constraint::Min(1),                         // task table
            Constraint::Length(1),                      // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    form_view::render_form(frame, app, chunks[1]);
    // Overdue is evaluated against the wall clock on every frame
    table_view::render_table(frame, app, chunks[2], dates::now_local());
    status_row::render_status_row(frame, app, chunks[3]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
