// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. search::SearchError)
    clippy::module_name_repetitions
)]

//! # Pixscroll
//!
//! Incremental image search in the terminal.
//!
//! A query starts a search session; result pages are fetched one at a time
//! as the user scrolls toward the end of what is already shown:
//! - Page requests are triggered by a viewport sentinel, never by a timer
//! - At most one request is outstanding per session
//! - A new query supersedes the old session; late responses are dropped
//! - Fetching stops once every page the service reported has been consumed
//!
//! ## Architecture
//!
//! Pixscroll uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`session`]: Pagination controller, search sessions and the sentinel
//! - [`search`]: Image search service, Pixabay client and fetch worker
//! - [`gallery`]: Result cards
//! - [`ui`]: Terminal UI components
//! - [`config`]: Layered defaults
//! - [`perf`]: Timing scopes and the debug event log

pub mod app;
pub mod config;
pub mod gallery;
pub mod perf;
pub mod search;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::search::{ImageItem, ImageSearchService, ResultPage, SearchRequest};
    pub use crate::session::{PaginationController, SessionStatus};
    pub use crate::ui::viewport::Viewport;
}
