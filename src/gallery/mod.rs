//! Result gallery.
//!
//! Lays out each [`ImageItem`] as a fixed-height text card. The gallery is
//! the [`ResultRenderer`] the TUI hands to the pagination controller; its
//! line count doubles as the position of the load-boundary marker.

use std::ops::Range;

use crate::search::ImageItem;
use crate::session::ResultRenderer;

/// Rows per result card, separator included.
pub const CARD_HEIGHT: usize = 5;

const INDENT: &str = "      ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Index and tags
    Title,
    /// Likes / views / comments / downloads
    Stats,
    /// Preview or full-size URL
    Link,
    /// Blank row between cards
    Separator,
}

/// One display row of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryLine {
    pub kind: LineKind,
    pub text: String,
    /// Index of the item this row belongs to
    pub item: usize,
}

/// Rendered result list, appended to page by page.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<ImageItem>,
    lines: Vec<GalleryLine>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn lines(&self) -> &[GalleryLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows in `range`, clamped to what exists.
    pub fn visible_lines(&self, range: Range<usize>) -> &[GalleryLine] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }
}

impl ResultRenderer for Gallery {
    fn append(&mut self, items: &[ImageItem]) {
        self.lines.reserve(items.len() * CARD_HEIGHT);
        for item in items {
            let index = self.items.len();
            self.lines.extend(card_lines(index, item));
            self.items.push(item.clone());
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.lines.clear();
    }
}

fn card_lines(index: usize, item: &ImageItem) -> [GalleryLine; CARD_HEIGHT] {
    let tags = if item.tags.trim().is_empty() {
        "(untagged)"
    } else {
        item.tags.trim()
    };
    let line = |kind, text| GalleryLine {
        kind,
        text,
        item: index,
    };
    [
        line(LineKind::Title, format!("{:>4}. {tags}", index + 1)),
        line(
            LineKind::Stats,
            format!(
                "{INDENT}Likes {}   Views {}   Comments {}   Downloads {}",
                compact_count(item.likes),
                compact_count(item.views),
                compact_count(item.comments),
                compact_count(item.downloads)
            ),
        ),
        line(LineKind::Link, format!("{INDENT}preview  {}", item.preview_url)),
        line(LineKind::Link, format!("{INDENT}full     {}", item.full_url)),
        line(LineKind::Separator, String::new()),
    ]
}

/// Short human form of a counter: `999`, `12.3k`, `4.5M`.
// Display only; precision loss is fine
#[allow(clippy::cast_precision_loss)]
pub fn compact_count(n: u64) -> String {
    match n {
        0..1_000 => n.to_string(),
        1_000..1_000_000 => format!("{:.1}k", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}
