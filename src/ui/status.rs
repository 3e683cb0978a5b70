use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::ui::style::{search_bar_style, status_bar_style, toast_style};

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (text, editing) = match model.search_input.as_deref() {
        Some(input) => (
            format!(" Search: {input}\u{2588}  Enter: search  Esc: cancel"),
            true,
        ),
        None => match model.current_query() {
            Some(query) => (format!(" Search: {query}  (/ to edit)"), false),
            None => (" Press / to search for images".to_string(), false),
        },
    };
    let bar = Paragraph::new(super::truncate_to_width(&text, area.width as usize))
        .style(search_bar_style(editing));
    frame.render_widget(bar, area);
}

/// Query, session status, pages loaded, items loaded of total, scroll position.
pub fn status_line(model: &Model) -> String {
    let Some(session) = model.controller.session() else {
        return format!(" [{}]  ?:help", model.status().label());
    };
    let total = session
        .total_hits()
        .map_or_else(|| "?".to_string(), |total| total.to_string());
    format!(
        " {}  [{}]  page {}  {}/{}  [{}%]  ?:help",
        session.query(),
        session.status().label(),
        session.current_page().saturating_sub(1),
        session.loaded(),
        total,
        model.viewport.scroll_percent()
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = status_line(model);
    let status_bar = Paragraph::new(super::truncate_to_width(&status, area.width as usize))
        .style(status_bar_style());
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = toast_style(level);
    let text = format!("{prefix} {message}");
    let toast = Paragraph::new(super::truncate_to_width(&text, area.width as usize)).style(style);
    frame.render_widget(toast, area);
}
