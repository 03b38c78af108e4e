//! Process settings for the `quakemap` binary.
//!
//! Settings come from environment variables; the map itself is described by
//! an optional YAML file (see [`MapConfig`]). There are no command-line
//! flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use quakemap_core::MapConfig;

use crate::error::AppError;

/// Settings loaded from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    /// Path to the YAML map configuration, if any.
    pub config_path: Option<String>,
    /// Where to write the HTML page. Overrides `output.html_path`.
    pub output_path: Option<String>,
    /// Directory holding a `map.html.j2` that replaces the built-in page.
    pub templates_dir: Option<String>,
    /// When set, serve the rendered page on this address after writing it.
    pub serve: Option<SocketAddr>,
}

impl AppSettings {
    /// Load settings from environment variables.
    ///
    /// Optional variables:
    /// - `QUAKEMAP_CONFIG` -- path to the YAML map configuration
    /// - `QUAKEMAP_OUTPUT` -- HTML output path (default from config, `quakemap.html`)
    /// - `QUAKEMAP_TEMPLATES_DIR` -- directory with a replacement `map.html.j2`
    /// - `QUAKEMAP_SERVE_PORT` -- serve the page on this port after rendering
    /// - `QUAKEMAP_SERVE_HOST` -- bind IP for serving (default `127.0.0.1`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let serve = var("QUAKEMAP_SERVE_PORT")
            .map(|raw| serve_addr(&raw, var("QUAKEMAP_SERVE_HOST").as_deref()))
            .transpose()?;

        Ok(Self {
            config_path: var("QUAKEMAP_CONFIG"),
            output_path: var("QUAKEMAP_OUTPUT"),
            templates_dir: var("QUAKEMAP_TEMPLATES_DIR"),
            serve,
        })
    }

    /// Load the map configuration named by `QUAKEMAP_CONFIG`, or the
    /// defaults when none is set. Environment overrides apply either way.
    pub fn load_map_config(&self) -> Result<MapConfig, AppError> {
        match &self.config_path {
            Some(path) => Ok(MapConfig::from_file(Path::new(path))?),
            None => Ok(MapConfig::from_env_defaults()),
        }
    }

    /// The HTML output path: the setting if present, else the config's.
    pub fn output_path_for(&self, config: &MapConfig) -> String {
        self.output_path
            .clone()
            .unwrap_or_else(|| config.output.html_path.clone())
    }
}

fn serve_addr(port: &str, host: Option<&str>) -> Result<SocketAddr, AppError> {
    let port: u16 = port.trim().parse().map_err(|e| {
        AppError::Settings(format!("invalid QUAKEMAP_SERVE_PORT {port:?}: {e}"))
    })?;
    let Some(host) = host else {
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port));
    };
    let ip: IpAddr = host.trim().parse().map_err(|e| {
        AppError::Settings(format!("invalid QUAKEMAP_SERVE_HOST {host:?}: {e}"))
    })?;
    Ok(SocketAddr::new(ip, port))
}
