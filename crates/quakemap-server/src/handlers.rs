//! Endpoint handlers for the map server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | The rendered map page |
//! | `GET` | `/api/map` | The full map document |
//! | `GET` | `/api/layers/{name}` | One layer of the document |
//! | `GET` | `/api/timeline?at=<ms>` | Timeline markers visible at an instant |
//! | `GET` | `/api/health` | Layer counts, backdrop, time span, render time |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};
use quakemap_types::{MapDocument, TimedMarker};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MapApiError;
use crate::state::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is answering.
    pub status: &'static str,
    /// Map title.
    pub title: String,
    /// Earthquake markers in the point layer.
    pub earthquakes: usize,
    /// Fault lines in the line layer.
    pub fault_lines: usize,
    /// Features dropped while decoding.
    pub skipped: usize,
    /// Name of the backdrop shown on load.
    pub backdrop: Option<String>,
    /// Earliest timeline start, in ms since the epoch.
    pub time_start: Option<i64>,
    /// Latest timeline end, in ms since the epoch.
    pub time_end: Option<i64>,
    /// When the served render completed.
    pub rendered_at: DateTime<Utc>,
}

/// Query parameters for `GET /api/timeline`.
#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    /// Cursor position in ms since the epoch.
    pub at: i64,
}

/// Body of `GET /api/timeline`.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    /// The cursor that was asked for.
    pub at: i64,
    /// Number of visible markers.
    pub count: usize,
    /// Entries whose interval contains the cursor, in feed order.
    pub entries: Vec<TimedMarker>,
}

/// Serve the rendered page.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(state.map.page.clone())
}

/// Return the whole map document.
pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapDocument> {
    Json(state.map.document.clone())
}

/// Return a single layer by name.
///
/// Accepted names are `earthquakes`, `fault_lines`, and `timeline`.
pub async fn get_layer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, MapApiError> {
    let document = &state.map.document;
    let layer = match name.as_str() {
        "earthquakes" => serde_json::to_value(&document.points)?,
        "fault_lines" => serde_json::to_value(&document.lines)?,
        "timeline" => serde_json::to_value(&document.timeline)?,
        other => return Err(MapApiError::NotFound(format!("layer {other}"))),
    };
    Ok(Json(layer))
}

/// Return the timeline entries the time slider shows at `at`.
pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimelineQuery>,
) -> Json<TimelineResponse> {
    let entries: Vec<TimedMarker> = state
        .map
        .document
        .timeline
        .visible_at(query.at)
        .cloned()
        .collect();
    Json(TimelineResponse {
        at: query.at,
        count: entries.len(),
        entries,
    })
}

/// Report the served render's counts.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let map = &state.map;
    Json(HealthResponse {
        status: "ok",
        title: map.document.title.clone(),
        earthquakes: map.document.summary.earthquakes,
        fault_lines: map.document.summary.fault_lines,
        skipped: map.document.summary.skipped,
        backdrop: map
            .document
            .selected_base_layer()
            .map(|layer| layer.name.clone()),
        time_start: map.document.time_control.start,
        time_end: map.document.time_control.end,
        rendered_at: map.rendered_at,
    })
}
