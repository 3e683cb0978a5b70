//! Scroll state of the results pane.
//!
//! The [`Viewport`] tracks which rows of the result gallery are on screen.
//! It also answers the two geometric questions the pagination logic asks:
//! is a row within some margin of the visible window, and has the bottom of
//! the content been reached.

use std::ops::Range;

/// The visible window over the result gallery.
///
/// # Example
///
/// ```
/// use pixscroll::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 100);
/// assert_eq!(vp.visible_range(), 0..20);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..30);
/// assert!(vp.is_within(34, 5));
/// assert!(!vp.is_within(35, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport `width` columns wide and `height` rows tall over
    /// `total_lines` rows of content.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// First row below the visible window.
    pub const fn bottom(&self) -> usize {
        self.offset + self.height as usize
    }

    /// Rows currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        self.offset..self.bottom().min(self.total_lines)
    }

    /// Whether `line` lies on screen or within `margin` rows of it.
    ///
    /// `line` may be one past the end of the content, which is where the
    /// load boundary marker sits.
    pub const fn is_within(&self, line: usize, margin: usize) -> bool {
        let top = self.offset.saturating_sub(margin);
        let bottom = self.bottom().saturating_add(margin);
        line >= top && line < bottom
    }

    /// Whether the last content row is on screen.
    pub const fn reached_end(&self) -> bool {
        self.bottom() >= self.total_lines
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        // Always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Apply a new pane size, keeping the offset valid.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length after rows were appended or cleared.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
