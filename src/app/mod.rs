//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Page fetches run on a [`FetchWorker`](crate::search::FetchWorker) thread;
//! the loop drains their outcomes into the model between frames.

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CHROME_ROWS, Model, ToastLevel, Toasts, results_height};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::search::ImageSearchService;
use crate::session::{DEFAULT_PAGE_SIZE, DEFAULT_PROXIMITY};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    service: Arc<dyn ImageSearchService>,
    page_size: u32,
    proximity: usize,
    initial_query: Option<String>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application backed by `service`.
    pub fn new(service: Arc<dyn ImageSearchService>) -> Self {
        Self {
            service,
            page_size: DEFAULT_PAGE_SIZE,
            proximity: DEFAULT_PROXIMITY,
            initial_query: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Results requested per page.
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Rows of look-ahead before the load boundary triggers a fetch.
    pub const fn with_proximity(mut self, proximity: usize) -> Self {
        self.proximity = proximity;
        self
    }

    /// Query to submit on startup. Without one the search bar opens.
    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.initial_query = query;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
