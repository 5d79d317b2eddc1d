use chrono::NaiveDateTime;
use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::Task;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Label shown in the status column of the task table
pub fn status_label(task: &Task, now: NaiveDateTime) -> &'static str {
    if task.is_overdue(now) {
        "Overdue"
    } else {
        task.status.label()
    }
}

impl Theme {
    /// Build a theme from `[ui.colors]`, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring unparseable color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "selection_bg" => theme.selection_bg = color,
                _ => tracing::warn!(slot = %key, "unknown color slot"),
            }
        }

        theme
    }

    /// Color for a task's status column. Overdue is evaluated against `now`.
    pub fn status_color(&self, task: &Task, now: NaiveDateTime) -> Color {
        if task.is_overdue(now) {
            self.red
        } else if task.status.is_completed() {
            self.green
        } else {
            self.yellow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, completed, due, task};

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("highlight".into(), "not-a-color".into());
        ui.colors.insert("nonsense".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.highlight, Theme::default().highlight);
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn test_status_color_and_label() {
        let theme = Theme::default();
        let now = at("2024-06-01 12:00");

        let late = due(task(1, "A"), "2024-06-01 11:59");
        assert_eq!(theme.status_color(&late, now), theme.red);
        assert_eq!(status_label(&late, now), "Overdue");

        let on_time = due(task(2, "B"), "2024-06-01 12:00");
        assert_eq!(theme.status_color(&on_time, now), theme.yellow);
        assert_eq!(status_label(&on_time, now), "Pending");

        let done_late = completed(late.clone());
        assert_eq!(theme.status_color(&done_late, now), theme.green);
        assert_eq!(status_label(&done_late, now), "Completed");
    }
}
