//! Terminal UI components.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{render, split_screen};
pub use status::status_line;
pub use viewport::Viewport;

use unicode_width::UnicodeWidthChar;

/// Cut `text` to at most `max_width` terminal columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::with_capacity(text.len().min(max_width * 4));
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}
