//! The assembled map document and its controls.
//!
//! A [`MapDocument`] is everything a render target needs to display the
//! map: the initial view, the backdrops, the overlays, the legend, the time
//! control, and the three data layers. It serializes to JSON unchanged so
//! the page script can read it directly.

use serde::{Deserialize, Serialize};

use crate::layers::{LineLayer, PointLayer, TimeLayer};
use crate::model::LatLng;
use crate::style::MagnitudeColor;

/// Screen corner a control is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    #[default]
    BottomRight,
}

/// Initial viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Map centre.
    pub center: LatLng,
    /// Zoom level.
    pub zoom: u8,
    /// Whether the scroll wheel zooms the map.
    pub scroll_wheel_zoom: bool,
}

/// A tile backdrop. Exactly one is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseLayer {
    /// Label shown in the layer control.
    pub name: String,
    /// Tile URL with `{z}`, `{x}`, `{y}` placeholders left in place.
    pub url_template: String,
    /// Whether this backdrop is shown on load.
    pub selected: bool,
}

/// Which data layer an overlay toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// The point layer.
    Earthquakes,
    /// The line layer.
    FaultLines,
}

/// A toggleable overlay entry in the layer control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    /// Label shown in the layer control.
    pub name: String,
    /// The layer it toggles.
    pub kind: OverlayKind,
    /// Whether the overlay is shown on load.
    pub visible: bool,
}

/// Layer-selection control options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerControl {
    /// Whether the control starts collapsed into an icon.
    pub collapsed: bool,
}

/// One row of the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Human-readable magnitude range, e.g. `1–2` or `5+`.
    pub label: String,
    /// Swatch colour.
    pub color: MagnitudeColor,
}

/// The magnitude legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    /// Anchor corner.
    pub position: ControlPosition,
    /// Rows, lowest bin first.
    pub entries: Vec<LegendEntry>,
}

/// How the time control renders its cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLabelFormat {
    /// Full human-readable date and time string.
    #[default]
    FullDateTime,
}

/// Time-slider control bound to the time layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    /// Cursor label format.
    pub label_format: TimeLabelFormat,
    /// Earliest interval start, if the time layer is non-empty.
    pub start: Option<i64>,
    /// Latest interval end, if the time layer is non-empty.
    pub end: Option<i64>,
}

/// Count of events falling in one colour bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinCount {
    /// The bin.
    pub color: MagnitudeColor,
    /// Number of events in it.
    pub count: usize,
}

/// Counts reported alongside the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    /// Earthquake events drawn.
    pub earthquakes: usize,
    /// Fault lines drawn.
    pub fault_lines: usize,
    /// Vertices across all fault-line paths.
    pub fault_line_vertices: usize,
    /// Features skipped as malformed, across both feeds.
    pub skipped: usize,
    /// Events per colour bin, lowest bin first.
    pub by_bin: Vec<BinCount>,
    /// When the earthquake feed was generated, in ms since the epoch.
    pub feed_generated: Option<i64>,
}

/// Everything needed to display the map once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Id of the display container element.
    pub container: String,
    /// Page title.
    pub title: String,
    /// Initial viewport.
    pub view: MapView,
    /// Tile backdrops, mutually exclusive.
    pub base_layers: Vec<BaseLayer>,
    /// Toggleable overlays.
    pub overlays: Vec<Overlay>,
    /// Layer control options.
    pub layer_control: LayerControl,
    /// Magnitude legend.
    pub legend: Legend,
    /// Time-slider control.
    pub time_control: TimeControl,
    /// Earthquake markers with popups.
    pub points: PointLayer,
    /// Fault-line polylines.
    pub lines: LineLayer,
    /// Time-indexed earthquake markers.
    pub timeline: TimeLayer,
    /// Counts for logging and display.
    pub summary: MapSummary,
}

impl MapDocument {
    /// The backdrop shown on load.
    pub fn selected_base_layer(&self) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|layer| layer.selected)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn control_position_serializes_lowercase() {
        let json = serde_json::to_value(ControlPosition::BottomRight).unwrap();
        assert_eq!(json, "bottomright");
        let parsed: ControlPosition = serde_json::from_str("\"topleft\"").unwrap();
        assert_eq!(parsed, ControlPosition::TopLeft);
    }

    #[test]
    fn overlay_kind_serializes_snake_case() {
        let json = serde_json::to_value(OverlayKind::FaultLines).unwrap();
        assert_eq!(json, "fault_lines");
    }

    #[test]
    fn time_label_format_defaults_to_full() {
        assert_eq!(TimeLabelFormat::default(), TimeLabelFormat::FullDateTime);
        let json = serde_json::to_value(TimeLabelFormat::FullDateTime).unwrap();
        assert_eq!(json, "full_date_time");
    }
}
