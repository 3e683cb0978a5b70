//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::gallery::LineKind;

/// Get the style for a gallery row.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    match kind {
        LineKind::Title => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        LineKind::Stats => Style::default().fg(Color::Indexed(245)),
        LineKind::Link => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        LineKind::Separator => Style::default(),
    }
}

/// Prefix and bar style for a toast.
pub fn toast_style(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Success => ("[ok]", Style::default().bg(Color::Green).fg(Color::Black)),
        ToastLevel::Info => ("[info]", Style::default().bg(Color::DarkGray).fg(Color::White)),
        ToastLevel::Failure => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}

pub fn search_bar_style(editing: bool) -> Style {
    if editing {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default().bg(Color::Black).fg(Color::Indexed(250))
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Dim style for placeholders and the trailing loading row.
pub fn hint_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::ITALIC)
}
