//! Entry point for the `quakemap` renderer.
//!
//! Fetches the week's earthquakes and the tectonic plate boundaries, builds
//! the map document, and writes it out as a standalone Leaflet page.
//!
//! # Architecture
//!
//! ```text
//! HttpFeedSource --> quakemap-core pipeline --> HtmlFileTarget --> (optional) quakemap-server
//! ```
//!
//! Configuration comes from environment variables and an optional YAML map
//! file. A failed fetch or decode aborts before anything is written and the
//! process exits non-zero.

mod error;
mod http;
mod page;
mod settings;
mod target;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use quakemap_core::render_map;
use quakemap_server::{AppState, MapState, start_server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::http::HttpFeedSource;
use crate::page::PageRenderer;
use crate::settings::AppSettings;
use crate::target::HtmlFileTarget;

/// Application entry point.
///
/// Initializes logging, loads settings, and hands over to [`run`].
///
/// # Errors
///
/// Returns an error if setup, fetching, decoding, rendering, or serving
/// fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("quakemap starting");

    let settings = AppSettings::from_env().context("reading quakemap settings")?;
    run(&settings)
        .await
        .inspect_err(|e| error!(error = %e, "quakemap failed"))
        .context("rendering the earthquake map")
}

/// Render the page, then serve it when `QUAKEMAP_SERVE_PORT` is set.
async fn run(settings: &AppSettings) -> Result<(), AppError> {
    let config = settings.load_map_config()?;
    let locators = config.locators();
    let output_path = settings.output_path_for(&config);
    info!(
        config_path = settings.config_path.as_deref().unwrap_or("<defaults>"),
        earthquakes_url = locators.earthquakes,
        fault_lines_url = locators.fault_lines,
        output_path,
        "configuration loaded"
    );

    let timeout = config.feeds.request_timeout_ms.map(Duration::from_millis);
    let source = HttpFeedSource::new(timeout)?;
    let renderer = PageRenderer::new(settings.templates_dir.as_deref())?;
    let mut target = HtmlFileTarget::new(renderer, &output_path);

    let document = render_map(&source, &locators, &config, &mut target).await?;

    info!(
        path = %target.output_path().display(),
        earthquakes = document.summary.earthquakes,
        fault_lines = document.summary.fault_lines,
        skipped = document.summary.skipped,
        backdrop = document
            .selected_base_layer()
            .map_or("<none>", |layer| layer.name.as_str()),
        "quakemap finished rendering"
    );

    let Some(addr) = settings.serve else {
        return Ok(());
    };
    let page = target
        .into_page()
        .ok_or_else(|| AppError::Template("page was not kept after rendering".to_owned()))?;
    let state = Arc::new(AppState::new(MapState::new(document, page)));
    start_server(addr, state).await?;

    Ok(())
}
