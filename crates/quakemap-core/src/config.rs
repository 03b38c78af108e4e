//! Configuration loading and typed config structures for `QuakeMap`.
//!
//! The configuration is an optional YAML file (conventionally
//! `quakemap.yaml`). Every field has a default matching the stock map, so an
//! empty document, or no document at all, renders the standard
//! past-week earthquake map over the PB2002 plate boundaries.

use std::path::Path;

use quakemap_types::ControlPosition;
use serde::Deserialize;

use crate::fetch::FeedLocators;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level map configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapConfig {
    /// Feed locations and request settings.
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Tile backdrop settings.
    #[serde(default)]
    pub tiles: TilesConfig,

    /// Display container and initial viewport.
    #[serde(default)]
    pub view: ViewConfig,

    /// Overlay names, visibility, and fault-line styling.
    #[serde(default)]
    pub layers: LayersConfig,

    /// Legend placement.
    #[serde(default)]
    pub legend: LegendConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl MapConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `QUAKEMAP_EARTHQUAKES_URL` overrides `feeds.earthquakes_url`
    /// - `QUAKEMAP_FAULT_LINES_URL` overrides `feeds.fault_lines_url`
    /// - `MAPBOX_ACCESS_TOKEN` overrides `tiles.access_token`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults plus environment overrides, for runs without a config file.
    pub fn from_env_defaults() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Override fields from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override fields from an arbitrary variable lookup.
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// wipe a configured URL.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(val) = non_empty("QUAKEMAP_EARTHQUAKES_URL") {
            self.feeds.earthquakes_url = val;
        }
        if let Some(val) = non_empty("QUAKEMAP_FAULT_LINES_URL") {
            self.feeds.fault_lines_url = val;
        }
        if let Some(val) = non_empty("MAPBOX_ACCESS_TOKEN") {
            self.tiles.access_token = val;
        }
    }

    /// The two feed locators, earthquakes first.
    pub fn locators(&self) -> FeedLocators {
        FeedLocators {
            earthquakes: self.feeds.earthquakes_url.clone(),
            fault_lines: self.feeds.fault_lines_url.clone(),
        }
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Feed locations and request settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedsConfig {
    /// Earthquake feature-collection URL (or local path).
    #[serde(default = "default_earthquakes_url")]
    pub earthquakes_url: String,

    /// Fault-line feature-collection URL (or local path).
    #[serde(default = "default_fault_lines_url")]
    pub fault_lines_url: String,

    /// Per-request timeout in milliseconds. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            earthquakes_url: default_earthquakes_url(),
            fault_lines_url: default_fault_lines_url(),
            request_timeout_ms: None,
        }
    }
}

/// One tile backdrop style.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TileStyle {
    /// Label shown in the layer control.
    pub name: String,
    /// Style identifier substituted for `{style}` in the URL template.
    pub style_id: String,
}

/// Tile backdrop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TilesConfig {
    /// Tile URL template. `{style}` and `{token}` are substituted here;
    /// `{z}`, `{x}`, `{y}` are left for the mapping library.
    #[serde(default = "default_tile_url_template")]
    pub url_template: String,

    /// Access credential embedded in tile URLs.
    #[serde(default)]
    pub access_token: String,

    /// Available backdrops, in layer-control order.
    #[serde(default = "default_tile_styles")]
    pub styles: Vec<TileStyle>,

    /// Name of the backdrop selected on load.
    #[serde(default = "default_selected_style")]
    pub selected: String,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            url_template: default_tile_url_template(),
            access_token: String::new(),
            styles: default_tile_styles(),
            selected: default_selected_style(),
        }
    }
}

/// Display container and initial viewport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewConfig {
    /// Id of the element the map is drawn into.
    #[serde(default = "default_container")]
    pub container: String,

    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial centre latitude.
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial centre longitude.
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Initial zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Whether the scroll wheel zooms the map.
    #[serde(default)]
    pub scroll_wheel_zoom: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            title: default_title(),
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            scroll_wheel_zoom: false,
        }
    }
}

/// Overlay names, visibility, and fault-line styling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayersConfig {
    /// Layer-control label of the point layer.
    #[serde(default = "default_earthquakes_name")]
    pub earthquakes_name: String,

    /// Layer-control label of the line layer.
    #[serde(default = "default_fault_lines_name")]
    pub fault_lines_name: String,

    /// Whether the point layer is visible on load.
    #[serde(default = "default_true")]
    pub show_earthquakes: bool,

    /// Whether the line layer is visible on load.
    #[serde(default = "default_true")]
    pub show_fault_lines: bool,

    /// Fault-line stroke colour (CSS).
    #[serde(default = "default_fault_line_color")]
    pub fault_line_color: String,

    /// Fault-line stroke weight in pixels.
    #[serde(default = "default_fault_line_weight")]
    pub fault_line_weight: u32,

    /// Whether the layer control starts collapsed.
    #[serde(default)]
    pub control_collapsed: bool,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            earthquakes_name: default_earthquakes_name(),
            fault_lines_name: default_fault_lines_name(),
            show_earthquakes: true,
            show_fault_lines: true,
            fault_line_color: default_fault_line_color(),
            fault_line_weight: default_fault_line_weight(),
            control_collapsed: false,
        }
    }
}

/// Legend placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LegendConfig {
    /// Anchor corner.
    #[serde(default)]
    pub position: ControlPosition,
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Where the rendered HTML page is written.
    #[serde(default = "default_html_path")]
    pub html_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html_path: default_html_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_earthquakes_url() -> String {
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson".to_owned()
}

fn default_fault_lines_url() -> String {
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json"
        .to_owned()
}

fn default_tile_url_template() -> String {
    "https://api.mapbox.com/styles/v1/mapbox/{style}/tiles/256/{z}/{x}/{y}?access_token={token}"
        .to_owned()
}

fn default_tile_styles() -> Vec<TileStyle> {
    [
        ("Satellite", "satellite-v9"),
        ("Grayscale", "light-v9"),
        ("Outdoors", "outdoors-v10"),
    ]
    .into_iter()
    .map(|(name, style_id)| TileStyle {
        name: name.to_owned(),
        style_id: style_id.to_owned(),
    })
    .collect()
}

fn default_selected_style() -> String {
    "Satellite".to_owned()
}

fn default_container() -> String {
    "map".to_owned()
}

fn default_title() -> String {
    "Earthquakes, Past 7 Days".to_owned()
}

const fn default_center_lat() -> f64 {
    39.8283
}

const fn default_center_lng() -> f64 {
    -98.5785
}

const fn default_zoom() -> u8 {
    3
}

fn default_earthquakes_name() -> String {
    "Earthquakes".to_owned()
}

fn default_fault_lines_name() -> String {
    "Fault Lines".to_owned()
}

fn default_fault_line_color() -> String {
    "orange".to_owned()
}

const fn default_fault_line_weight() -> u32 {
    2
}

fn default_html_path() -> String {
    "quakemap.html".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = MapConfig::parse_yaml("").unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.view.container, "map");
        assert_eq!(config.view.zoom, 3);
        assert!(!config.view.scroll_wheel_zoom);
        assert_eq!(config.tiles.styles.len(), 3);
        assert_eq!(config.tiles.selected, "Satellite");
        assert_eq!(config.layers.fault_line_weight, 2);
        assert_eq!(config.legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let yaml = r"
view:
  zoom: 5
  scroll_wheel_zoom: true
layers:
  fault_line_color: crimson
legend:
  position: topleft
";
        let config = MapConfig::parse_yaml(yaml).unwrap();
        assert_eq!(config.view.zoom, 5);
        assert!(config.view.scroll_wheel_zoom);
        assert_eq!(config.view.container, "map");
        assert_eq!(config.layers.fault_line_color, "crimson");
        assert_eq!(config.layers.fault_lines_name, "Fault Lines");
        assert_eq!(config.legend.position, ControlPosition::TopLeft);
        assert_eq!(config.feeds, FeedsConfig::default());
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = MapConfig::parse_yaml("view: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_replace_urls_and_token() {
        let mut config = MapConfig::default();
        config.apply_overrides(|name| match name {
            "QUAKEMAP_EARTHQUAKES_URL" => Some("https://example.test/quakes.json".to_owned()),
            "MAPBOX_ACCESS_TOKEN" => Some("pk.test".to_owned()),
            "QUAKEMAP_FAULT_LINES_URL" => Some("   ".to_owned()),
            _ => None,
        });
        assert_eq!(
            config.feeds.earthquakes_url,
            "https://example.test/quakes.json"
        );
        assert_eq!(config.tiles.access_token, "pk.test");
        assert_eq!(config.feeds.fault_lines_url, default_fault_lines_url());
    }

    #[test]
    fn locators_follow_feed_config() {
        let config = MapConfig::default();
        let locators = config.locators();
        assert!(locators.earthquakes.ends_with("all_week.geojson"));
        assert!(locators.fault_lines.ends_with("PB2002_boundaries.json"));
    }

    #[test]
    fn file_is_parsed_like_a_string() {
        let name = format!("quakemap_config_{}.yaml", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "view:\n  zoom: 6\n").unwrap();

        let config = MapConfig::from_file(&path).unwrap();
        assert_eq!(config.view.zoom, 6);
        assert_eq!(config.tiles.selected, "Satellite");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("quakemap_no_such_config.yaml");
        let result = MapConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
