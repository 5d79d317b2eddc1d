use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

use super::helpers::{flash_span, spans_width};

/// Key hints for the current mode
pub(super) fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "e edit  c complete  d delete  r reload  q quit",
        Mode::Form => "Enter add  Tab next field  Esc table",
        Mode::Edit => "Enter save  Tab next field  Esc cancel",
        Mode::Confirm => "y delete  n cancel",
    }
}

/// Render the status row (bottom of screen): app-level message on the
/// left, key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    if let Some(notice) = &app.notice {
        spans.push(flash_span(notice, &app.theme, bg));
    }

    let hint = hints(app.mode());
    let content_width = spans_width(&spans);
    let hint_width = display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
