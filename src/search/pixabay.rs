//! Pixabay REST adapter.

use std::time::Duration;

use reqwest::blocking::{Client, Request};
use serde::Deserialize;

use super::{ImageItem, ImageSearchService, ResultPage, SearchError, SearchRequest};

pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PixabayResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    total_hits: u64,
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(rename = "webformatURL", default)]
    webformat_url: String,
    #[serde(rename = "largeImageURL", default)]
    large_image_url: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    views: u64,
    #[serde(default)]
    comments: u64,
    #[serde(default)]
    downloads: u64,
}

impl From<PixabayHit> for ImageItem {
    fn from(hit: PixabayHit) -> Self {
        Self {
            preview_url: hit.webformat_url,
            full_url: hit.large_image_url,
            tags: hit.tags,
            likes: hit.likes,
            views: hit.views,
            comments: hit.comments,
            downloads: hit.downloads,
        }
    }
}

/// Decode a Pixabay JSON body into a [`ResultPage`].
///
/// # Errors
///
/// Returns [`SearchError::Decode`] if the body is not valid JSON or has the
/// wrong shape.
pub fn decode_response(body: &str) -> Result<ResultPage, SearchError> {
    let response: PixabayResponse = serde_json::from_str(body)?;
    Ok(ResultPage {
        items: response.hits.into_iter().map(ImageItem::from).collect(),
        total_hits: response.total_hits,
        total_available: response.total,
    })
}

/// Blocking HTTP client for the Pixabay image API.
///
/// Results are restricted server-side to horizontal, safe-search photos.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl PixabayClient {
    /// Create a client against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (proxies, test servers).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pixscroll/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET request for one page without sending it.
    ///
    /// The query string is form-encoded by the HTTP client, so arbitrary user
    /// input is safe to pass through.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn build_request(&self, request: &SearchRequest) -> Result<Request, SearchError> {
        let params = [
            ("key", self.api_key.clone()),
            ("q", request.query.clone()),
            ("image_type", "photo".to_string()),
            ("orientation", "horizontal".to_string()),
            ("safesearch", "true".to_string()),
            ("per_page", request.page_size.to_string()),
            ("page", request.page.to_string()),
        ];
        Ok(self.http.get(&self.endpoint).query(&params).build()?)
    }
}

impl ImageSearchService for PixabayClient {
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError> {
        let http_request = self.build_request(request)?;
        tracing::debug!(
            query = %request.query,
            page = request.page,
            per_page = request.page_size,
            "pixabay request"
        );
        let response = self.http.execute(http_request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        decode_response(&body)
    }
}
