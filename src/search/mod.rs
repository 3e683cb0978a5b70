//! Remote image search.
//!
//! The [`ImageSearchService`] trait is the boundary to the third-party
//! search endpoint. [`PixabayClient`] is the HTTP implementation and
//! [`FetchWorker`] runs searches off the UI thread.

mod pixabay;
mod worker;

pub use pixabay::{DEFAULT_ENDPOINT, PixabayClient, decode_response};
pub use worker::FetchWorker;

/// One image returned by the search service.
///
/// The payload is opaque to the pagination logic and handed to the
/// renderer as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageItem {
    /// Small image suitable for the result list
    pub preview_url: String,
    /// Full-size image
    pub full_url: String,
    /// Comma separated tags
    pub tags: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    /// Items on this page, in server order
    pub items: Vec<ImageItem>,
    /// Number of hits the service will actually page through
    pub total_hits: u64,
    /// Number of matches in the index (may exceed `total_hits`)
    pub total_available: u64,
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page,
            page_size,
        }
    }
}

/// Errors produced by an [`ImageSearchService`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request never completed (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(u16),
    /// The response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The search thread died before reporting back.
    #[error("search worker stopped unexpectedly")]
    WorkerPanicked,
}

// The request URL carries the API key in its query string.
impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Read-only query → paged results boundary.
pub trait ImageSearchService: Send + Sync {
    /// Fetch one page of results.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] when the request fails, the service answers
    /// with a non-success status, or the body cannot be decoded.
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError>;
}
