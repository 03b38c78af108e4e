//! Error types for the `quakemap` binary.
//!
//! Uses `thiserror` for typed errors covering settings, configuration,
//! HTTP client construction, and page templating. Pipeline and server
//! failures arrive as [`QuakeMapError`] and [`ServerError`] and are wrapped
//! unchanged.

use quakemap_core::QuakeMapError;
use quakemap_core::config::ConfigError;
use quakemap_server::ServerError;

/// Errors that can occur while setting up or running a render.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An environment setting is invalid.
    #[error("settings error: {0}")]
    Settings(String),

    /// The map configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The page template could not be loaded or rendered.
    #[error("template error: {0}")]
    Template(String),

    /// The render pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] QuakeMapError),

    /// The map server could not start or stopped with an error.
    #[error(transparent)]
    Serve(#[from] ServerError),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn render_step() -> Result<(), AppError> {
        Err(QuakeMapError::Render("disk full".to_owned()))?
    }

    fn serve_step() -> Result<(), AppError> {
        Err(ServerError::Bind("address in use".to_owned()))?
    }

    #[test]
    fn pipeline_failure_keeps_its_message() {
        let err = render_step().unwrap_err();
        assert!(matches!(err, AppError::Pipeline(QuakeMapError::Render(_))));
        assert_eq!(err.to_string(), "render error: disk full");
    }

    #[test]
    fn server_failure_is_wrapped() {
        let err = serve_step().unwrap_err();
        assert!(matches!(err, AppError::Serve(ServerError::Bind(_))));
        assert_eq!(err.to_string(), "bind error: address in use");
    }
}
