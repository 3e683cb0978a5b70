//! Output ports driven by the pagination controller.

use crate::search::ImageItem;

/// Displays result items.
///
/// Implementations only append or clear on instruction and keep no
/// pagination state of their own.
pub trait ResultRenderer {
    /// Append a batch of items after everything already shown.
    fn append(&mut self, items: &[ImageItem]);

    /// Remove everything shown.
    fn clear(&mut self);
}

/// Surfaces user-facing messages. Fire-and-forget.
pub trait NotificationSink {
    fn success(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn failure(&mut self, message: &str);
}
