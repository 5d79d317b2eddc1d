use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::flash::{Flash, FlashKind};
use crate::tui::form::{Draft, Field};
use crate::tui::text_input::TextInput;
use crate::tui::theme::Theme;
use crate::util::unicode::{self, next_grapheme_boundary};

/// Width of the label column in form and edit lines
pub(super) const LABEL_W: usize = 12;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` out to `width` cells
pub(super) fn pad_to(spans: &mut Vec<Span<'static>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Spans for a text input. A focused input shows a block cursor.
pub(super) fn input_spans(
    input: &TextInput,
    focused: bool,
    style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    if !focused {
        return vec![Span::styled(input.value().to_string(), style)];
    }
    let (before, rest) = input.split_at_cursor();
    let (under, after) = match next_grapheme_boundary(rest, 0) {
        Some(end) => rest.split_at(end),
        None => (" ", ""),
    };
    vec![
        Span::styled(before.to_string(), style),
        Span::styled(under.to_string(), cursor_style),
        Span::styled(after.to_string(), style),
    ]
}

/// One labelled line of a draft: `Title *     value`
pub(super) fn field_line(
    draft: &Draft,
    field: Field,
    show_cursor: bool,
    indent: &str,
    theme: &Theme,
    bg: ratatui::style::Color,
) -> Vec<Span<'static>> {
    let focused = show_cursor && draft.focus == field;
    let label_style = if focused {
        Style::default().fg(theme.highlight).bg(bg)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    let mut spans = vec![
        Span::styled(indent.to_string(), Style::default().bg(bg)),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_W), label_style),
    ];
    let value_style = Style::default().fg(theme.text_bright).bg(bg);
    let cursor_style = Style::default()
        .fg(theme.background)
        .bg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    spans.extend(input_spans(
        draft.field(field),
        focused,
        value_style,
        cursor_style,
    ));
    spans
}

/// A transient message, colored by kind
pub(super) fn flash_span(flash: &Flash, theme: &Theme, bg: ratatui::style::Color) -> Span<'static> {
    let fg = match flash.kind {
        FlashKind::Success => theme.green,
        FlashKind::Error => theme.red,
    };
    Span::styled(flash.text.clone(), Style::default().fg(fg).bg(bg))
}
