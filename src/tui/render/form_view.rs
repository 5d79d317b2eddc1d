use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::form::Field;

use super::helpers::{field_line, flash_span};

/// Rows taken by the form panel, borders included
pub const FORM_HEIGHT: u16 = 6;

/// Render the new-task form: three fields and an action line
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let focused = app.focus == Focus::Form;
    let form = &app.form;

    let mut lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| Line::from(field_line(&form.draft, field, focused, " ", theme, bg)))
        .collect();

    let mut action = vec![Span::styled(" ", Style::default().bg(bg))];
    if form.loading {
        action.push(Span::styled(
            "[Adding...]",
            Style::default().fg(theme.dim).bg(bg),
        ));
    } else if form.can_submit() {
        action.push(Span::styled(
            "[Add task]",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        action.push(Span::styled("[Add task]", Style::default().fg(theme.dim).bg(bg)));
    }
    if let Some(flash) = &form.flash {
        action.push(Span::styled("  ", Style::default().bg(bg)));
        action.push(flash_span(flash, theme, bg));
    }
    lines.push(Line::from(action));

    let border = if focused { theme.highlight } else { theme.dim };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New task ")
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        area,
    );
}
