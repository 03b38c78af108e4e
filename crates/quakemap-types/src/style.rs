//! Derived display values: magnitude colours, marker styles, time intervals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six magnitude colour categories, lowest bin first.
///
/// Serializes as the CSS colour keyword the browser draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeColor {
    /// Magnitude up to and including 1.
    GreenYellow,
    /// Magnitude above 1, up to and including 2.
    YellowGreen,
    /// Magnitude above 2, up to and including 3.
    Yellow,
    /// Magnitude above 3, up to and including 4.
    Gold,
    /// Magnitude above 4, up to and including 5.
    Orange,
    /// Magnitude above 5.
    Red,
}

impl MagnitudeColor {
    /// All categories in bin order.
    pub const ALL: [Self; 6] = [
        Self::GreenYellow,
        Self::YellowGreen,
        Self::Yellow,
        Self::Gold,
        Self::Orange,
        Self::Red,
    ];

    /// The CSS colour keyword.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::GreenYellow => "greenyellow",
            Self::YellowGreen => "yellowgreen",
            Self::Yellow => "yellow",
            Self::Gold => "gold",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for MagnitudeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Circle marker style derived from a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Stroke colour.
    pub color: MagnitudeColor,
    /// Fill colour. Always equal to `color`.
    pub fill_color: MagnitudeColor,
    /// Circle radius in pixels. Never negative.
    pub radius: f64,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
}

/// The span during which a time-layer feature is visible.
///
/// Both bounds are milliseconds since the epoch, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Event origin time.
    pub start: i64,
    /// Time after which the feature is hidden again.
    pub end: i64,
}

impl TimeInterval {
    /// Whether a time cursor falls inside the interval (inclusive bounds).
    pub const fn contains(&self, cursor_ms: i64) -> bool {
        self.start <= cursor_ms && cursor_ms <= self.end
    }
}
