use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::gallery::Gallery;
use crate::session::{
    FetchOutcome, FetchRequest, NotificationSink, PaginationController, SessionStatus,
};
use crate::ui::Viewport;

/// Rows reserved for the search bar and the status bar.
pub const CHROME_ROWS: u16 = 2;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Failure,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The single visible toast. A newer toast replaces the current one.
#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
}

impl Toasts {
    pub fn show(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.current = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Drop the toast once it has expired. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.current = None;
            return true;
        }
        false
    }

    pub fn active(&self) -> Option<(&str, ToastLevel)> {
        self.current
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl NotificationSink for Toasts {
    fn success(&mut self, message: &str) {
        self.show(ToastLevel::Success, message);
    }

    fn info(&mut self, message: &str) {
        self.show(ToastLevel::Info, message);
    }

    fn failure(&mut self, message: &str) {
        self.show(ToastLevel::Failure, message);
    }
}

/// The complete application state.
#[derive(Debug, Default)]
pub struct Model {
    pub viewport: Viewport,
    pub controller: PaginationController,
    pub gallery: Gallery,
    pub toasts: Toasts,
    /// Text being typed into the search bar; `None` when not editing
    pub search_input: Option<String>,
    pub help_visible: bool,
    pub should_quit: bool,
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
}

impl Model {
    /// Create a model for a terminal of `(width, height)`.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        Self {
            viewport: Viewport::new(width, results_height(height), 0),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_controller(mut self, controller: PaginationController) -> Self {
        self.controller = controller;
        self
    }

    /// The query of the active session, if any.
    pub fn current_query(&self) -> Option<&str> {
        self.controller.session().map(|session| session.query())
    }

    pub fn status(&self) -> SessionStatus {
        self.controller.status()
    }

    /// Start a new search, replacing whatever is on screen.
    pub fn submit_query(&mut self, query: &str) {
        self.controller.submit(query, &mut self.gallery);
        self.sync_viewport();
        self.viewport.go_to_top();
    }

    /// Let the controller look at the current viewport and hand back a
    /// fetch to dispatch if the load boundary came into range.
    pub fn poll_sentinel(&mut self) -> Option<FetchRequest> {
        let marker = self.gallery.line_count();
        self.controller
            .on_viewport(&self.viewport, marker, &mut self.toasts)
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.controller
            .handle_outcome(outcome, &mut self.gallery, &mut self.toasts);
        self.sync_viewport();
    }

    pub fn sync_viewport(&mut self) {
        self.viewport.set_total_lines(self.gallery.line_count());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, results_height(height));
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.show(level, message);
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        self.toasts.expire(now)
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toasts.active()
    }
}

/// Height left for results once the chrome rows are taken.
pub const fn results_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(CHROME_ROWS)
}
