//! Feed source trait and the ordered two-feed fetch.
//!
//! The earthquake feed is requested first. The fault-line request is only
//! started once the earthquake body has arrived, and both must succeed
//! before anything downstream runs. There is no retry and no fallback data.
//!
//! [`FeedSource`] abstracts the transport: the binary uses an HTTP client,
//! tests and offline runs use [`StaticFeedSource`].

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use quakemap_types::FeedKind;
use tracing::info;

use crate::error::QuakeMapError;

/// A transport-level failure reported by a [`FeedSource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchFailure {
    /// Description of what went wrong.
    pub message: String,
}

impl FetchFailure {
    /// Create a failure from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A source of feed bodies.
pub trait FeedSource {
    /// Retrieve the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] if the resource cannot be retrieved.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>> + Send;
}

/// The two feed locators, earthquakes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLocators {
    /// Earthquake feed.
    pub earthquakes: String,
    /// Fault-line feed.
    pub fault_lines: String,
}

/// Both feed bodies, fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeeds {
    /// Earthquake feed body.
    pub earthquakes: String,
    /// Fault-line feed body.
    pub fault_lines: String,
}

/// Where the ordered fetch currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// Waiting for the earthquake body.
    AwaitingEarthquakes,
    /// Earthquake body received, waiting for the fault-line body.
    AwaitingFaultLines,
    /// Both bodies received.
    Ready,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingEarthquakes => f.write_str("awaiting_earthquakes"),
            Self::AwaitingFaultLines => f.write_str("awaiting_fault_lines"),
            Self::Ready => f.write_str("ready"),
        }
    }
}

/// Fetch both feeds in order.
///
/// # Errors
///
/// Returns [`QuakeMapError::Fetch`] naming the first feed that failed. The
/// fault-line feed is never requested if the earthquake fetch fails.
pub async fn fetch_feeds<S>(source: &S, locators: &FeedLocators) -> Result<RawFeeds, QuakeMapError>
where
    S: FeedSource + Sync,
{
    let mut stage = FetchStage::AwaitingEarthquakes;
    info!(%stage, url = locators.earthquakes, "fetching earthquake feed");
    let earthquakes = fetch_one(source, FeedKind::Earthquakes, &locators.earthquakes).await?;

    stage = FetchStage::AwaitingFaultLines;
    info!(
        %stage,
        url = locators.fault_lines,
        bytes = earthquakes.len(),
        "earthquake feed received, fetching fault-line feed"
    );
    let fault_lines = fetch_one(source, FeedKind::FaultLines, &locators.fault_lines).await?;

    stage = FetchStage::Ready;
    info!(%stage, bytes = fault_lines.len(), "fault-line feed received");

    Ok(RawFeeds {
        earthquakes,
        fault_lines,
    })
}

async fn fetch_one<S>(source: &S, feed: FeedKind, url: &str) -> Result<String, QuakeMapError>
where
    S: FeedSource + Sync,
{
    source
        .fetch(url)
        .await
        .map_err(|source| QuakeMapError::Fetch {
            feed,
            url: url.to_owned(),
            source,
        })
}

/// An in-memory feed source keyed by URL.
///
/// Used for tests and for rendering from bodies obtained elsewhere.
/// Unknown URLs fail with a "not found" [`FetchFailure`].
#[derive(Debug, Clone, Default)]
pub struct StaticFeedSource {
    bodies: BTreeMap<String, String>,
}

impl StaticFeedSource {
    /// Create an empty source.
    pub const fn new() -> Self {
        Self {
            bodies: BTreeMap::new(),
        }
    }

    /// Register the body served for `url`.
    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl FeedSource for StaticFeedSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>> + Send {
        let result = self
            .bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchFailure::new(format!("no body registered for {url}")));
        std::future::ready(result)
    }
}
