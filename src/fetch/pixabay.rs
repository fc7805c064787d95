//! Pixabay image search backend.
//!
//! Blocking HTTP client; always called from a [`FetchWorker`](super::FetchWorker)
//! thread, never from the event loop.

use super::ResultFetcher;
use crate::config::ResolvedConfig;
use crate::model::{FetchError, ResultId, ResultItem, ResultPage};
use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Longest error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// [`ResultFetcher`] backed by the Pixabay REST API.
#[derive(Debug, Clone)]
pub struct PixabayFetcher {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    per_page: u32,
}

impl PixabayFetcher {
    /// Create a fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        per_page: u32,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("picseek/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            per_page,
        })
    }

    /// Create a fetcher from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.per_page,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Page size requested from the endpoint.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Build the GET request for `(query, page)` without sending it.
    fn build_request(&self, query: &str, page: u32) -> Result<Request, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        let params: [(&str, String); 7] = [
            ("key", api_key.to_string()),
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("image_type", "photo".to_string()),
            ("orientation", "horizontal".to_string()),
            ("safesearch", "true".to_string()),
        ];

        self.client
            .get(&self.base_url)
            .query(&params)
            .build()
            .map_err(|e| FetchError::Transport(format!("invalid request: {e}")))
    }
}

impl ResultFetcher for PixabayFetcher {
    fn fetch(&self, query: &str, page: u32) -> Result<ResultPage, FetchError> {
        let request = self.build_request(query, page)?;
        debug!(query, page, "Sending search request");

        let response = self.client.execute(request).map_err(|e| {
            warn!(error = %e, "Search request failed before a response arrived");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        decode_page(&body)
    }
}

// ===== Wire format =====

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "totalHits")]
    total_hits: u32,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    tags: String,
    #[serde(default, rename = "imageWidth")]
    image_width: u32,
    #[serde(default, rename = "imageHeight")]
    image_height: u32,
    #[serde(default)]
    user: String,
    #[serde(default)]
    views: u64,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    downloads: u64,
}

impl From<Hit> for ResultItem {
    fn from(hit: Hit) -> Self {
        ResultItem {
            id: ResultId::new(hit.id),
            preview_url: hit.webformat_url,
            large_url: hit.large_image_url,
            tags: hit.tags,
            width: hit.image_width,
            height: hit.image_height,
            author: hit.user,
            views: hit.views,
            likes: hit.likes,
            downloads: hit.downloads,
        }
    }
}

/// Decode a search response body into a [`ResultPage`].
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the body is not valid JSON or lacks
/// `totalHits` or a required hit field.
pub fn decode_page(body: &str) -> Result<ResultPage, FetchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(ResultPage {
        items: response.hits.into_iter().map(ResultItem::from).collect(),
        total_hits: response.total_hits,
    })
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_string()
    } else {
        let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        cut.push('…');
        cut
    }
}
