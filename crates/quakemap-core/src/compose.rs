//! Composition of the three display layers from decoded feeds.
//!
//! - Point layer: one circle marker per event, styled by magnitude, with a
//!   popup giving place, time, and magnitude on separate lines.
//! - Line layer: one polyline per fault line, fixed colour and weight.
//! - Time layer: the point-layer markers tagged with a visibility interval.
//!
//! Empty inputs yield empty layers.

use chrono::DateTime;
use quakemap_types::{
    EarthquakeEvent, FaultLine, LineLayer, PointLayer, Polyline, Popup, Position, QuakeMarker,
    TimeLayer, TimedMarker,
};

use crate::classify::{marker_style, time_interval};
use crate::config::LayersConfig;

/// `chrono` format of the popup time line.
pub const EVENT_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// The three layers produced from one pair of feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedLayers {
    /// Earthquake markers.
    pub points: PointLayer,
    /// Fault-line polylines.
    pub lines: LineLayer,
    /// Time-indexed earthquake markers.
    pub timeline: TimeLayer,
}

/// Build all three layers.
pub fn compose_layers(
    events: &[EarthquakeEvent],
    fault_lines: &[FaultLine],
    layers: &LayersConfig,
) -> ComposedLayers {
    ComposedLayers {
        points: point_layer(events),
        lines: line_layer(
            fault_lines,
            &layers.fault_line_color,
            layers.fault_line_weight,
        ),
        timeline: time_layer(events),
    }
}

/// One marker per event.
pub fn point_layer(events: &[EarthquakeEvent]) -> PointLayer {
    PointLayer {
        markers: events.iter().map(quake_marker).collect(),
    }
}

/// One polyline per fault line, all drawn with the same stroke.
pub fn line_layer(fault_lines: &[FaultLine], color: &str, weight: u32) -> LineLayer {
    LineLayer {
        polylines: fault_lines
            .iter()
            .map(|line| fault_polyline(line, color, weight))
            .collect(),
    }
}

/// One timed marker per event.
pub fn time_layer(events: &[EarthquakeEvent]) -> TimeLayer {
    TimeLayer {
        entries: events
            .iter()
            .map(|event| TimedMarker {
                marker: quake_marker(event),
                interval: time_interval(event.time_ms, event.magnitude),
            })
            .collect(),
    }
}

/// The circle marker for an event.
pub fn quake_marker(event: &EarthquakeEvent) -> QuakeMarker {
    QuakeMarker {
        position: event.position.to_lat_lng(),
        style: marker_style(event.magnitude),
        popup: popup_for(event),
    }
}

/// Popup lines: place, formatted time, magnitude.
pub fn popup_for(event: &EarthquakeEvent) -> Popup {
    Popup {
        lines: vec![
            event.place.clone(),
            format_event_time(event.time_ms),
            format!("Magnitude: {}", event.magnitude),
        ],
    }
}

/// Full human-readable UTC date and time of an epoch-millisecond instant.
///
/// Falls back to the raw number for instants `chrono` cannot represent.
pub fn format_event_time(time_ms: i64) -> String {
    DateTime::from_timestamp_millis(time_ms).map_or_else(
        || time_ms.to_string(),
        |at| at.format(EVENT_TIME_FORMAT).to_string(),
    )
}

/// The polyline for a fault line.
pub fn fault_polyline(line: &FaultLine, color: &str, weight: u32) -> Polyline {
    Polyline {
        paths: line
            .paths
            .iter()
            .map(|path| path.iter().copied().map(Position::to_lat_lng).collect())
            .collect(),
        color: color.to_owned(),
        weight,
    }
}
