//! Axum router construction for the map server.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the router serving a finished render.
///
/// The router includes:
/// - `GET /` -- the map page
/// - `GET /api/map` -- the map document
/// - `GET /api/layers/{name}` -- one layer
/// - `GET /api/timeline?at=<ms>` -- markers visible at an instant
/// - `GET /api/health` -- counts, backdrop, time span, and render time
///
/// CORS allows any origin so the document can feed other map front ends.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/map", get(handlers::get_map))
        .route("/api/layers/{name}", get(handlers::get_layer))
        .route("/api/timeline", get(handlers::get_timeline))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
