//! Error types for the render pipeline.
//!
//! Any [`QuakeMapError`] aborts the render: nothing is presented and no
//! partial map is shown. Malformed individual features are not errors; the
//! decoder skips them with a warning.

use quakemap_types::FeedKind;

use crate::fetch::FetchFailure;

/// Errors that abort a render pass.
#[derive(Debug, thiserror::Error)]
pub enum QuakeMapError {
    /// A feed could not be retrieved.
    #[error("failed to fetch {feed} feed from {url}: {source}")]
    Fetch {
        /// Which feed failed.
        feed: FeedKind,
        /// The locator that was requested.
        url: String,
        /// What the feed source reported.
        source: FetchFailure,
    },

    /// A feed body is not a JSON feature collection.
    #[error("failed to decode {feed} feed: {source}")]
    Decode {
        /// Which feed failed.
        feed: FeedKind,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A feed body is JSON, but its `type` is not `FeatureCollection`.
    #[error("{feed} feed is a `{found}`, expected a FeatureCollection")]
    NotFeatureCollection {
        /// Which feed failed.
        feed: FeedKind,
        /// The `type` member actually found.
        found: String,
    },

    /// The render target could not present the map.
    #[error("render error: {0}")]
    Render(String),
}
