//! End-to-end tests of the render pipeline against in-memory feeds.
//!
//! No network is used: feed bodies are served by `StaticFeedSource` and the
//! presented document is captured by a recording target.

#![allow(clippy::unwrap_used)]

use quakemap_core::config::MapConfig;
use quakemap_core::fetch::{FeedLocators, StaticFeedSource};
use quakemap_core::{QuakeMapError, RenderTarget, render_map};
use quakemap_types::{MagnitudeColor, MapDocument, OverlayKind};

const QUAKES_URL: &str = "https://feeds.test/all_week.geojson";
const FAULTS_URL: &str = "https://feeds.test/PB2002_boundaries.json";

#[derive(Default)]
struct Capture {
    presented: Option<MapDocument>,
}

impl RenderTarget for Capture {
    fn present(&mut self, document: &MapDocument) -> Result<(), QuakeMapError> {
        self.presented = Some(document.clone());
        Ok(())
    }
}

fn locators() -> FeedLocators {
    FeedLocators {
        earthquakes: QUAKES_URL.to_owned(),
        fault_lines: FAULTS_URL.to_owned(),
    }
}

fn quakes_body() -> String {
    serde_json::json!({
        "type": "FeatureCollection",
        "metadata": {
            "title": "USGS All Earthquakes, Past Week",
            "generated": 1_700_000_000_000_i64,
            "count": 2
        },
        "features": [
            {
                "type": "Feature",
                "id": "nc1",
                "geometry": {"type": "Point", "coordinates": [-122.8, 38.8, 2.1]},
                "properties": {"mag": 0.5, "place": "The Geysers, CA", "time": 1000}
            },
            {
                "type": "Feature",
                "id": "us2",
                "geometry": {"type": "Point", "coordinates": [142.4, 38.3, 29.0]},
                "properties": {"mag": 6.0, "place": "near the east coast of Honshu, Japan", "time": 5000}
            }
        ]
    })
    .to_string()
}

fn faults_body() -> String {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"Name": "PA-NA"},
            "geometry": {"type": "LineString", "coordinates": [[-124.0, 40.0], [-122.0, 37.0], [-116.0, 32.0]]}
        }]
    })
    .to_string()
}

fn source() -> StaticFeedSource {
    StaticFeedSource::new()
        .with_body(QUAKES_URL, quakes_body())
        .with_body(FAULTS_URL, faults_body())
}

#[tokio::test]
async fn two_quakes_one_fault_line() {
    let mut target = Capture::default();
    render_map(&source(), &locators(), &MapConfig::default(), &mut target)
        .await
        .unwrap();
    let doc = target.presented.unwrap();

    assert_eq!(doc.points.len(), 2);
    let colors: Vec<_> = doc.points.markers.iter().map(|m| m.style.color).collect();
    assert_eq!(colors, vec![MagnitudeColor::GreenYellow, MagnitudeColor::Red]);
    let radii: Vec<_> = doc.points.markers.iter().map(|m| m.style.radius).collect();
    assert!(radii.first().is_some_and(|r| (r - 2.5).abs() < 1e-9));
    assert!(radii.last().is_some_and(|r| (r - 30.0).abs() < 1e-9));

    assert_eq!(doc.lines.len(), 1);
    let line = doc.lines.polylines.first().unwrap();
    assert_eq!(line.color, "orange");
    assert_eq!(line.weight, 2);
    assert_eq!(line.paths.first().map(Vec::len), Some(3));

    assert_eq!(doc.timeline.len(), 2);
    let intervals: Vec<_> = doc
        .timeline
        .entries
        .iter()
        .map(|e| (e.interval.start, e.interval.end))
        .collect();
    assert_eq!(intervals, vec![(1000, 5_001_000), (5000, 60_005_000)]);
    assert_eq!(doc.time_control.start, Some(1000));
    assert_eq!(doc.time_control.end, Some(60_005_000));
}

#[tokio::test]
async fn document_carries_controls_and_summary() {
    let mut target = Capture::default();
    let doc = render_map(&source(), &locators(), &MapConfig::default(), &mut target)
        .await
        .unwrap();

    assert_eq!(doc.base_layers.len(), 3);
    assert_eq!(
        doc.selected_base_layer().map(|l| l.name.as_str()),
        Some("Satellite")
    );
    let kinds: Vec<_> = doc.overlays.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![OverlayKind::Earthquakes, OverlayKind::FaultLines]);
    assert!(doc.overlays.iter().all(|o| o.visible));
    assert_eq!(doc.legend.entries.len(), 6);

    assert_eq!(doc.summary.earthquakes, 2);
    assert_eq!(doc.summary.fault_lines, 1);
    assert_eq!(doc.summary.fault_line_vertices, 3);
    assert_eq!(doc.summary.skipped, 0);
    assert_eq!(doc.summary.feed_generated, Some(1_700_000_000_000));
}

#[tokio::test]
async fn popup_lines_follow_place_time_magnitude() {
    let mut target = Capture::default();
    let doc = render_map(&source(), &locators(), &MapConfig::default(), &mut target)
        .await
        .unwrap();
    let popup = &doc.points.markers.last().unwrap().popup;
    assert_eq!(
        popup.lines,
        vec![
            "near the east coast of Honshu, Japan".to_owned(),
            "Thu Jan 01 1970 00:00:05 UTC".to_owned(),
            "Magnitude: 6".to_owned(),
        ]
    );
}

#[tokio::test]
async fn document_round_trips_through_json() {
    let mut target = Capture::default();
    let doc = render_map(&source(), &locators(), &MapConfig::default(), &mut target)
        .await
        .unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["legend"]["position"], "bottomright");
    assert_eq!(json["points"]["markers"][1]["style"]["fill_color"], "red");
    assert_eq!(json["view"]["zoom"], 3);
}
