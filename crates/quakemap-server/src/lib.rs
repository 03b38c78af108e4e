//! HTTP surface for a rendered `QuakeMap`.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **The map page** (`GET /`) exactly as it was written to disk
//! - **The map document** (`GET /api/map`) as JSON, for other front ends
//! - **Single layers** (`GET /api/layers/{name}`) for `earthquakes`,
//!   `fault_lines`, or `timeline`
//! - **The timeline at an instant** (`GET /api/timeline?at=<ms>`), the
//!   markers the time slider shows at that cursor
//! - **A health summary** (`GET /api/health`) with layer counts, the
//!   selected backdrop, the time span, and the render timestamp
//!
//! The served state is built once from a finished render and never changes
//! afterwards, so handlers read it without locking.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::MapApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, MapState};
