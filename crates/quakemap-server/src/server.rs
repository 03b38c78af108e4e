//! Map server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Serve a finished render on `addr` until `Ctrl-C`.
///
/// In-flight requests are allowed to complete before returning.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listener cannot bind, or
/// [`ServerError::Serve`] on a fatal I/O error while serving.
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

    info!(
        %addr,
        earthquakes = state.map.document.summary.earthquakes,
        "map server listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    info!("map server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal"),
        Err(e) => {
            // Without a signal handler the server runs until the process is killed.
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Errors that can occur when starting or running the map server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use quakemap_core::assemble::{assemble_map, summarize};
    use quakemap_core::compose::compose_layers;
    use quakemap_core::config::MapConfig;

    use super::*;
    use crate::state::MapState;

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let config = MapConfig::default();
        let layers = compose_layers(&[], &[], &config.layers);
        let document = assemble_map(layers, summarize(&[], &[], 0), &config);
        let state = Arc::new(AppState::new(MapState::new(document, String::new())));

        let result = start_server(addr, state).await;
        assert!(matches!(result, Err(ServerError::Bind(_))));
    }
}
