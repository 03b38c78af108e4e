//! Feed retrieval over HTTP via `reqwest`, with local-file fallback.
//!
//! Locators with an `http://` or `https://` scheme are fetched with a GET
//! request; a non-success status is a failure carrying the start of the
//! response body. `file://` locators and bare paths are read from disk,
//! which allows rendering from saved copies of the feeds.

use std::future::Future;
use std::time::Duration;

use quakemap_core::{FeedSource, FetchFailure};
use tracing::debug;

use crate::error::AppError;

/// Maximum number of characters of an error body kept in a failure.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Feed source backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// Build a source. `timeout` bounds each whole request when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let user_agent = concat!("quakemap/", env!("CARGO_PKG_VERSION"));
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Client(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn get(client: &reqwest::Client, url: &str) -> Result<String, FetchFailure> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            let preview: String = error_body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            let message = format!("server returned {status}: {preview}");
            return Err(FetchFailure::new(message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::new(format!("failed to read response body: {e}")))?;
        debug!(url, bytes = body.len(), "feed downloaded");
        Ok(body)
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>> + Send {
        let client = self.client.clone();
        let locator = Locator::parse(url);
        async move {
            match locator {
                Locator::Remote(url) => Self::get(&client, &url).await,
                Locator::Local(path) => read_local(&path).await,
            }
        }
    }
}

/// Where a feed locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Locator {
    Remote(String),
    Local(String),
}

impl Locator {
    fn parse(url: &str) -> Self {
        if let Some(path) = url.strip_prefix("file://") {
            Self::Local(path.to_owned())
        } else if url.starts_with("http://") || url.starts_with("https://") {
            Self::Remote(url.to_owned())
        } else {
            Self::Local(url.to_owned())
        }
    }
}

async fn read_local(path: &str) -> Result<String, FetchFailure> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchFailure::new(format!("failed to read {path}: {e}")))?;
    debug!(path, bytes = body.len(), "feed read from disk");
    Ok(body)
}
