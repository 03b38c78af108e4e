//! Decoded domain entities: earthquake events and fault lines.
//!
//! Both are sourced verbatim from their feeds and never mutated after
//! decoding. Coordinates keep `GeoJSON` order (`longitude`, `latitude`) in
//! [`Position`]; display layers use [`LatLng`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two feeds a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// The earthquake event feed.
    Earthquakes,
    /// The tectonic plate boundary feed.
    FaultLines,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earthquakes => f.write_str("earthquakes"),
            Self::FaultLines => f.write_str("fault lines"),
        }
    }
}

/// A geographic position in `GeoJSON` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl Position {
    /// Read a position from a raw `GeoJSON` coordinate tuple.
    ///
    /// Extra members (altitude / depth) are ignored. Returns `None` when the
    /// tuple has fewer than two members or either member is not finite.
    pub fn from_coordinates(coordinates: &[f64]) -> Option<Self> {
        match coordinates {
            [longitude, latitude, ..] if longitude.is_finite() && latitude.is_finite() => {
                Some(Self {
                    longitude: *longitude,
                    latitude: *latitude,
                })
            }
            _ => None,
        }
    }

    /// The same point in display (`lat`, `lng`) order.
    pub const fn to_lat_lng(self) -> LatLng {
        LatLng {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// A position in the `[latitude, longitude]` order mapping libraries expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Construct from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One earthquake from the event feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    /// Feed identifier, when the feed provides one.
    pub id: Option<String>,
    /// Epicentre.
    pub position: Position,
    /// Hypocentre depth in kilometres, when the feed provides it.
    pub depth_km: Option<f64>,
    /// Origin time in milliseconds since the epoch.
    pub time_ms: i64,
    /// Magnitude. The sole driver of colour, size, and interval length.
    pub magnitude: f64,
    /// Textual description of the location.
    pub place: String,
    /// Link to the event page.
    pub url: Option<String>,
}

/// One plate boundary from the fault-line feed.
///
/// A `LineString` feature yields a single path; a `MultiLineString`
/// feature yields one path per part. Either way it is one fault line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultLine {
    /// Boundary name, when the feed provides one.
    pub name: Option<String>,
    /// Ordered coordinate sequences.
    pub paths: Vec<Vec<Position>>,
}

impl FaultLine {
    /// Total number of vertices across all paths.
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ignores_depth() {
        let pos = Position::from_coordinates(&[-98.5, 39.8, 10.0]);
        assert_eq!(
            pos,
            Some(Position {
                longitude: -98.5,
                latitude: 39.8
            })
        );
    }

    #[test]
    fn position_rejects_short_or_non_finite() {
        assert!(Position::from_coordinates(&[1.0]).is_none());
        assert!(Position::from_coordinates(&[]).is_none());
        assert!(Position::from_coordinates(&[f64::NAN, 1.0]).is_none());
        assert!(Position::from_coordinates(&[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn lat_lng_swaps_order() {
        let pos = Position {
            longitude: 120.0,
            latitude: -5.0,
        };
        assert_eq!(pos.to_lat_lng(), LatLng::new(-5.0, 120.0));
    }

    #[test]
    fn vertex_count_spans_parts() {
        let p = Position {
            longitude: 0.0,
            latitude: 0.0,
        };
        let line = FaultLine {
            name: None,
            paths: vec![vec![p, p, p], vec![p, p]],
        };
        assert_eq!(line.vertex_count(), 5);
    }

    #[test]
    fn feed_kind_display() {
        assert_eq!(FeedKind::Earthquakes.to_string(), "earthquakes");
        assert_eq!(FeedKind::FaultLines.to_string(), "fault lines");
    }
}
