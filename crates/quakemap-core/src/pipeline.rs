//! The render entry point.
//!
//! [`render_map`] runs one complete pass: ordered fetch, decode, compose,
//! assemble, present. Every stage receives its inputs as parameters; no
//! stage reaches back into an earlier one. On any error the target is never
//! called, so no partial map is ever shown.

use quakemap_types::MapDocument;
use tracing::info;

use crate::assemble::{assemble_map, summarize};
use crate::compose::{compose_layers, format_event_time};
use crate::config::MapConfig;
use crate::decode::{decode_earthquakes, decode_fault_lines};
use crate::error::QuakeMapError;
use crate::fetch::{FeedLocators, FeedSource, RawFeeds, fetch_feeds};

/// Something that can display an assembled map.
pub trait RenderTarget {
    /// Present the document.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeMapError::Render`] if the document cannot be shown.
    fn present(&mut self, document: &MapDocument) -> Result<(), QuakeMapError>;
}

/// Fetch both feeds from `source` and present the assembled map on
/// `target`.
///
/// Returns the document that was presented.
///
/// # Errors
///
/// Propagates fetch and decode failures before anything is presented, and
/// render failures from the target.
pub async fn render_map<S, T>(
    source: &S,
    locators: &FeedLocators,
    config: &MapConfig,
    target: &mut T,
) -> Result<MapDocument, QuakeMapError>
where
    S: FeedSource + Sync,
    T: RenderTarget + ?Sized,
{
    let raw = fetch_feeds(source, locators).await?;
    let document = build_document(&raw, config)?;
    target.present(&document)?;
    info!(
        earthquakes = document.summary.earthquakes,
        fault_lines = document.summary.fault_lines,
        "map presented"
    );
    Ok(document)
}

/// Decode, compose, and assemble already-fetched feed bodies.
///
/// # Errors
///
/// Returns a decode error if either body is not a feature collection.
pub fn build_document(raw: &RawFeeds, config: &MapConfig) -> Result<MapDocument, QuakeMapError> {
    let quakes = decode_earthquakes(&raw.earthquakes)?;
    let faults = decode_fault_lines(&raw.fault_lines)?;

    let metadata = quakes.metadata.as_ref();
    let feed_generated = metadata.and_then(|m| m.generated);
    if let Some(title) = metadata.and_then(|m| m.title.as_deref()) {
        let generated = feed_generated.map(format_event_time);
        info!(
            title,
            generated = generated.as_deref(),
            "earthquake feed metadata"
        );
    }
    info!(
        earthquakes = quakes.report.accepted,
        earthquakes_skipped = quakes.report.skipped,
        fault_lines = faults.report.accepted,
        fault_lines_skipped = faults.report.skipped,
        "feeds decoded"
    );

    let skipped = quakes.report.skipped.saturating_add(faults.report.skipped);
    let mut summary = summarize(&quakes.items, &faults.items, skipped);
    summary.feed_generated = feed_generated;
    info!(
        fault_lines = summary.fault_lines,
        vertices = summary.fault_line_vertices,
        "fault lines traced"
    );
    for bin in &summary.by_bin {
        info!(bin = %bin.color, count = bin.count, "magnitude bin");
    }

    let layers = compose_layers(&quakes.items, &faults.items, &config.layers);
    Ok(assemble_map(layers, summary, config))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::fetch::StaticFeedSource;

    #[derive(Default)]
    struct Capture {
        documents: Vec<MapDocument>,
    }

    impl RenderTarget for Capture {
        fn present(&mut self, document: &MapDocument) -> Result<(), QuakeMapError> {
            self.documents.push(document.clone());
            Ok(())
        }
    }

    struct Refuse;

    impl RenderTarget for Refuse {
        fn present(&mut self, _document: &MapDocument) -> Result<(), QuakeMapError> {
            Err(QuakeMapError::Render("display surface missing".to_owned()))
        }
    }

    fn locators() -> FeedLocators {
        FeedLocators {
            earthquakes: "mem://quakes".to_owned(),
            fault_lines: "mem://faults".to_owned(),
        }
    }

    const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    #[tokio::test]
    async fn presents_once_on_success() {
        let source = StaticFeedSource::new()
            .with_body("mem://quakes", EMPTY)
            .with_body("mem://faults", EMPTY);
        let mut target = Capture::default();
        let doc = render_map(&source, &locators(), &MapConfig::default(), &mut target)
            .await
            .unwrap();
        assert_eq!(target.documents.len(), 1);
        assert!(doc.points.is_empty());
        assert!(doc.lines.is_empty());
        assert!(doc.timeline.is_empty());
    }

    #[tokio::test]
    async fn nothing_presented_when_a_feed_fails() {
        let source = StaticFeedSource::new().with_body("mem://quakes", EMPTY);
        let mut target = Capture::default();
        let result = render_map(&source, &locators(), &MapConfig::default(), &mut target).await;
        assert!(result.is_err());
        assert!(target.documents.is_empty());
    }

    #[tokio::test]
    async fn nothing_presented_when_a_feed_is_garbage() {
        let source = StaticFeedSource::new()
            .with_body("mem://quakes", EMPTY)
            .with_body("mem://faults", "not json");
        let mut target = Capture::default();
        let result = render_map(&source, &locators(), &MapConfig::default(), &mut target).await;
        assert!(matches!(result, Err(QuakeMapError::Decode { .. })));
        assert!(target.documents.is_empty());
    }

    #[tokio::test]
    async fn target_failure_propagates() {
        let source = StaticFeedSource::new()
            .with_body("mem://quakes", EMPTY)
            .with_body("mem://faults", EMPTY);
        let result = render_map(&source, &locators(), &MapConfig::default(), &mut Refuse).await;
        assert!(matches!(result, Err(QuakeMapError::Render(_))));
    }
}
