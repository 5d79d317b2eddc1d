use chrono::NaiveDateTime;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::ops::ordering::status_counts;
use crate::tui::app::{App, Focus};
use crate::tui::form::Field;
use crate::tui::row::RowState;
use crate::tui::theme::status_label;
use crate::util::dates;
use crate::util::unicode::fit_to_width;

use super::helpers::{field_line, flash_span, pad_to};

const MARKER_W: usize = 2;
const STATUS_W: usize = 11;
const DATE_W: usize = 18;
/// Below this width the created column is dropped
const NARROW_W: usize = 64;
/// Indent of the lines under a row (edit fields, messages)
const DETAIL_INDENT: &str = "             ";

struct Columns {
    title: usize,
    show_created: bool,
}

impl Columns {
    fn for_width(width: usize) -> Self {
        let show_created = width >= NARROW_W;
        let dates = if show_created { 2 * DATE_W } else { DATE_W };
        Columns {
            title: width.saturating_sub(MARKER_W + STATUS_W + dates).max(8),
            show_created,
        }
    }
}

/// Render the task table, or the loading / error / empty state in its place.
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect, now: NaiveDateTime) {
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);

    if app.store.is_loading() {
        let loading = Paragraph::new(" Loading tasks...")
            .style(Style::default().fg(theme.dim).bg(bg));
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = app.store.error() {
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(theme.red).bg(bg),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " Press r to retry",
                Style::default().fg(theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(bg_style), area);
        return;
    }

    if app.store.tasks().is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                " No tasks found",
                Style::default().fg(theme.text_bright).bg(bg),
            )),
            Line::from(Span::styled(
                " Create your first task using the form above!",
                Style::default().fg(theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(bg_style), area);
        return;
    }

    let width = area.width as usize;
    let columns = Columns::for_width(width);

    let counts = status_counts(app.store.tasks());
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                " Tasks  ",
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} pending", counts.pending),
                Style::default().fg(theme.yellow).bg(bg),
            ),
            Span::styled("  ", bg_style),
            Span::styled(
                format!("{} completed", counts.completed),
                Style::default().fg(theme.green).bg(bg),
            ),
        ]),
        column_header(app, &columns),
    ];

    // Body lines tagged with the display index of the task they belong to
    let table_focused = app.focus == Focus::Table;
    let mut body: Vec<(usize, Line<'static>)> = Vec::new();
    for (i, task) in app.visible_tasks().into_iter().enumerate() {
        let is_cursor = table_focused && i == app.cursor;
        let row = app.row(&task.id);
        body.push((i, task_line(app, task, is_cursor, &columns, width, now)));
        for line in detail_lines(app, task, row, i == app.cursor) {
            body.push((i, line));
        }
    }

    let visible = (area.height as usize).saturating_sub(lines.len());
    let scroll = adjust_scroll(&body, app.cursor, app.scroll_offset, visible);
    app.scroll_offset = scroll;

    lines.extend(
        body.into_iter()
            .skip(scroll)
            .take(visible)
            .map(|(_, line)| line),
    );
    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// Scroll offset that keeps every line of the cursor's task on screen
fn adjust_scroll(body: &[(usize, Line)], cursor: usize, current: usize, visible: usize) -> usize {
    let first = body.iter().position(|(i, _)| *i == cursor);
    let last = body.iter().rposition(|(i, _)| *i == cursor);
    let (Some(first), Some(last)) = (first, last) else {
        return 0;
    };
    if visible == 0 {
        return first;
    }
    if first < current {
        first
    } else if last >= current + visible {
        (last + 1).saturating_sub(visible).min(first)
    } else {
        current
    }
}

fn column_header(app: &App, columns: &Columns) -> Line<'static> {
    let style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    let mut text = format!(
        "{}{}{}{}",
        " ".repeat(MARKER_W),
        fit_to_width("Status", STATUS_W),
        fit_to_width("Title", columns.title),
        fit_to_width("Due", DATE_W),
    );
    if columns.show_created {
        text.push_str("Created");
    }
    Line::from(Span::styled(text, style))
}

fn task_line(
    app: &App,
    task: &Task,
    is_cursor: bool,
    columns: &Columns,
    width: usize,
    now: NaiveDateTime,
) -> Line<'static> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let overdue = task.is_overdue(now);

    let mut spans = vec![
        Span::styled(
            if is_cursor { " \u{25B8}" } else { "  " },
            Style::default().fg(theme.highlight).bg(bg),
        ),
        Span::styled(
            fit_to_width(status_label(task, now), STATUS_W),
            Style::default().fg(theme.status_color(task, now)).bg(bg),
        ),
    ];

    let title_style = if task.status.is_completed() {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_bright).bg(bg)
    };
    spans.push(Span::styled(
        fit_to_width(&task.title, columns.title.saturating_sub(1)),
        title_style,
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    let due_color = if overdue { theme.red } else { theme.text };
    spans.push(Span::styled(
        fit_to_width(&dates::format_display(task.due_date.as_ref()), DATE_W),
        Style::default().fg(due_color).bg(bg),
    ));
    if columns.show_created {
        spans.push(Span::styled(
            fit_to_width(&dates::format_display(task.created_at.as_ref()), DATE_W),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }

    if is_cursor {
        pad_to(&mut spans, width, Style::default().bg(bg));
    }
    Line::from(spans)
}

/// Lines shown under a task: edit fields, delete prompt, progress and feedback.
/// The selected task also shows its description.
fn detail_lines(
    app: &App,
    task: &Task,
    row: Option<&RowState>,
    is_selected: bool,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let dim = Style::default().fg(theme.dim).bg(bg);
    let mut lines = Vec::new();

    let editor = row.and_then(|r| r.editor.as_ref());
    match editor {
        Some(draft) => {
            let focused = app.focus == Focus::Table && !row.is_some_and(|r| r.loading);
            for field in Field::ALL {
                lines.push(Line::from(field_line(
                    draft,
                    field,
                    focused,
                    DETAIL_INDENT,
                    theme,
                    bg,
                )));
            }
        }
        None if is_selected => {
            if let Some(description) = task.description() {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", DETAIL_INDENT, description),
                    dim,
                )));
            }
        }
        None => {}
    }

    let Some(row) = row else {
        return lines;
    };

    if row.confirm_delete {
        lines.push(Line::from(Span::styled(
            format!("{}Delete this task? (y/n)", DETAIL_INDENT),
            Style::default().fg(theme.red).bg(bg),
        )));
    }
    if row.loading {
        let text = if row.is_editing() { "Saving..." } else { "Working..." };
        lines.push(Line::from(Span::styled(
            format!("{}{}", DETAIL_INDENT, text),
            dim,
        )));
    }
    if let Some(flash) = &row.flash {
        lines.push(Line::from(vec![
            Span::styled(DETAIL_INDENT, Style::default().bg(bg)),
            flash_span(flash, theme, bg),
        ]));
    }
    lines
}
