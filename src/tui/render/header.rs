use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

use super::helpers::spans_width;

/// Title row with the API base URL, and a separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.cyan).bg(bg)),
        Span::styled(
            " agenda ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{2502} ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(app.api_url.clone(), Style::default().fg(app.theme.dim).bg(bg)),
    ];
    let help = "? help ";
    let used = spans_width(&spans);
    let help_width = display_width(help);
    if used + help_width < area.width as usize {
        spans.push(Span::styled(
            " ".repeat(area.width as usize - used - help_width),
            bg_style,
        ));
        spans.push(Span::styled(help, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let separator = "\u{2500}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(separator, Style::default().fg(app.theme.dim).bg(bg))),
        chunks[1],
    );
}
