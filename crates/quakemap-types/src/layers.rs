//! The three display layers composed from the feeds.

use serde::{Deserialize, Serialize};

use crate::model::LatLng;
use crate::style::{MarkerStyle, TimeInterval};

/// Popup content bound to a marker.
///
/// Each line is shown on its own visual line, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    /// Plain-text lines. The renderer escapes them.
    pub lines: Vec<String>,
}

/// A circle marker for one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeMarker {
    /// Marker centre.
    pub position: LatLng,
    /// Colour, radius, and opacity.
    pub style: MarkerStyle,
    /// Popup content.
    pub popup: Popup,
}

/// A polyline for one fault line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// One or more vertex sequences.
    pub paths: Vec<Vec<LatLng>>,
    /// Stroke colour (CSS).
    pub color: String,
    /// Stroke weight in pixels.
    pub weight: u32,
}

/// A marker tagged with the interval during which it is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedMarker {
    /// The marker drawn while visible.
    pub marker: QuakeMarker,
    /// Visibility window.
    pub interval: TimeInterval,
}

/// One marker per earthquake event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointLayer {
    /// Markers in feed order.
    pub markers: Vec<QuakeMarker>,
}

impl PointLayer {
    /// Number of markers.
    pub const fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the layer has no markers.
    pub const fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// One polyline per fault line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineLayer {
    /// Polylines in feed order.
    pub polylines: Vec<Polyline>,
}

impl LineLayer {
    /// Number of polylines.
    pub const fn len(&self) -> usize {
        self.polylines.len()
    }

    /// Whether the layer has no polylines.
    pub const fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}

/// Time-indexed markers driven by the time control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeLayer {
    /// Entries in feed order.
    pub entries: Vec<TimedMarker>,
}

impl TimeLayer {
    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layer has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose interval contains the cursor.
    pub fn visible_at(&self, cursor_ms: i64) -> impl Iterator<Item = &TimedMarker> {
        self.entries
            .iter()
            .filter(move |entry| entry.interval.contains(cursor_ms))
    }

    /// Earliest start and latest end over all entries.
    pub fn span(&self) -> Option<(i64, i64)> {
        let start = self.entries.iter().map(|e| e.interval.start).min()?;
        let end = self.entries.iter().map(|e| e.interval.end).max()?;
        Some((start, end))
    }
}
