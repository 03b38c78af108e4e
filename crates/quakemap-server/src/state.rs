//! Shared application state for the map server.

use chrono::{DateTime, Utc};
use quakemap_types::MapDocument;

/// A finished render: the document and the page produced from it.
#[derive(Debug, Clone)]
pub struct MapState {
    /// The assembled map document.
    pub document: MapDocument,
    /// The rendered HTML page.
    pub page: String,
    /// When the render completed.
    pub rendered_at: DateTime<Utc>,
}

impl MapState {
    /// Wrap a finished render, stamped with the current time.
    pub fn new(document: MapDocument, page: String) -> Self {
        Self {
            document,
            page,
            rendered_at: Utc::now(),
        }
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The render being served.
    pub map: MapState,
}

impl AppState {
    /// Create the application state for a render.
    pub const fn new(map: MapState) -> Self {
        Self { map }
    }
}
