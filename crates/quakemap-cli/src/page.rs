//! Page template loading and rendering via `minijinja`.
//!
//! The built-in page template is compiled into the binary. Operators can
//! replace it by pointing `QUAKEMAP_TEMPLATES_DIR` at a directory holding a
//! `map.html.j2`, without recompiling. The template receives the whole
//! [`MapDocument`] and embeds it as JSON for the page script, which hands
//! tiling, widgets, and the time slider to Leaflet.

use minijinja::{AutoEscape, Environment, context};
use quakemap_types::MapDocument;

use crate::error::AppError;

/// File name of the page template.
pub const PAGE_TEMPLATE: &str = "map.html.j2";

const BUILTIN_PAGE: &str = include_str!("../templates/map.html.j2");

/// Renders map documents into standalone HTML pages.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Create a renderer with the built-in template, or with the
    /// `map.html.j2` from `templates_dir` when one is given.
    pub fn new(templates_dir: Option<&str>) -> Result<Self, AppError> {
        let source = match templates_dir {
            Some(dir) => load_template(dir, PAGE_TEMPLATE)?,
            None => BUILTIN_PAGE.to_owned(),
        };
        Self::from_source(source)
    }

    /// Create a renderer from template source text.
    pub fn from_source(source: String) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(PAGE_TEMPLATE, source)
            .map_err(|e| AppError::Template(format!("failed to add page template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the page for a document.
    pub fn render(&self, document: &MapDocument) -> Result<String, AppError> {
        self.env
            .get_template(PAGE_TEMPLATE)
            .map_err(|e| AppError::Template(format!("missing page template: {e}")))?
            .render(context! {
                title => &document.title,
                container => &document.container,
                summary => &document.summary,
                document => document,
            })
            .map_err(|e| AppError::Template(format!("page render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, AppError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| AppError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use quakemap_core::assemble::{assemble_map, summarize};
    use quakemap_core::compose::compose_layers;
    use quakemap_core::config::MapConfig;
    use quakemap_types::{EarthquakeEvent, Position};

    use super::*;

    fn document(place: &str) -> MapDocument {
        let config = MapConfig::default();
        let events = vec![EarthquakeEvent {
            id: Some("ak1".to_owned()),
            position: Position {
                longitude: -150.0,
                latitude: 61.0,
            },
            depth_km: Some(40.0),
            time_ms: 1_700_000_000_000,
            magnitude: 3.1,
            place: place.to_owned(),
            url: None,
        }];
        let layers = compose_layers(&events, &[], &config.layers);
        assemble_map(layers, summarize(&events, &[], 0), &config)
    }

    #[test]
    fn builtin_page_embeds_document() {
        let renderer = PageRenderer::new(None).unwrap();
        let html = renderer.render(&document("Anchorage, Alaska")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"map\""));
        assert!(html.contains("Earthquakes, Past 7 Days"));
        assert!(html.contains("Anchorage, Alaska"));
        assert!(html.contains("leaflet.timeline"));
        assert!(html.contains("gold"));
    }

    #[test]
    fn embedded_json_cannot_close_the_script() {
        let renderer = PageRenderer::new(None).unwrap();
        let html = renderer
            .render(&document("</script><script>alert(1)</script>"))
            .unwrap();
        assert!(!html.contains("</script><script>alert(1)"));
    }

    #[test]
    fn custom_template_from_directory() {
        let unique = format!(
            "quakemap_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(
            dir.join(PAGE_TEMPLATE),
            "<h1>{{ title }}</h1><p>{{ summary.earthquakes }} quakes in #{{ container }}</p>",
        )
        .ok();

        let renderer = PageRenderer::new(dir.to_str()).unwrap();
        let html = renderer.render(&document("x")).unwrap();
        assert_eq!(
            html,
            "<h1>Earthquakes, Past 7 Days</h1><p>1 quakes in #map</p>"
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_directory_is_an_error() {
        let result = PageRenderer::new(Some("/no/such/quakemap/templates"));
        assert!(matches!(result, Err(AppError::Template(_))));
    }
}
