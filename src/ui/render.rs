use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::session::SessionStatus;

use super::style::{hint_style, style_for_line_kind};
use super::{overlays, status};

/// Search bar, results, status bar.
pub fn split_screen(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Render the whole screen for `model`.
pub fn render(model: &Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let [search_area, results_area, status_area] = split_screen(frame.area());

    status::render_search_bar(model, frame, search_area);
    render_results(model, frame, results_area);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, status_area);
    } else {
        status::render_status_bar(model, frame, status_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, frame.area());
    }
}

fn render_results(model: &Model, frame: &mut Frame, area: Rect) {
    if model.gallery.is_empty() {
        let hint = placeholder_text(model.status());
        frame.render_widget(Paragraph::new(Line::styled(hint, hint_style())), area);
        return;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = model
        .gallery
        .visible_lines(model.viewport.visible_range())
        .iter()
        .map(|line| {
            Line::styled(
                super::truncate_to_width(&line.text, width),
                style_for_line_kind(line.kind),
            )
        })
        .collect();

    // Row just past the last card, when it is on screen
    if lines.len() < area.height as usize
        && let Some(trailer) = trailer_text(model.status())
    {
        lines.push(Line::styled(trailer, hint_style()));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

const fn placeholder_text(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Idle => "  Press / to search for images",
        SessionStatus::AwaitingTrigger | SessionStatus::Fetching => "  Searching\u{2026}",
        SessionStatus::Exhausted | SessionStatus::Failed => {
            "  Nothing to show. Press / to try another search."
        }
    }
}

const fn trailer_text(status: SessionStatus) -> Option<&'static str> {
    match status {
        SessionStatus::Fetching => Some("  Loading more\u{2026}"),
        SessionStatus::Exhausted => Some("  (end of results)"),
        SessionStatus::Idle | SessionStatus::AwaitingTrigger | SessionStatus::Failed => None,
    }
}
