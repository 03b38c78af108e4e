//! Wire types for the `GeoJSON` feature collections served by both feeds.
//!
//! The collection keeps its features as untyped [`serde_json::Value`]s so a
//! single malformed feature can be rejected on its own instead of failing
//! the whole document. Each feature is then read into a typed
//! [`Feature`] with the property bag of its feed.

use serde::{Deserialize, Serialize};

/// A `GeoJSON` `FeatureCollection` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// The `GeoJSON` object type. Must be `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Feed metadata. Present on USGS summary feeds, absent elsewhere.
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,

    /// The raw features, decoded one at a time.
    pub features: Vec<serde_json::Value>,
}

impl FeatureCollection {
    /// The `GeoJSON` type tag of a feature collection.
    pub const TYPE: &'static str = "FeatureCollection";

    /// Whether the `type` member names a feature collection.
    pub fn is_feature_collection(&self) -> bool {
        self.kind == Self::TYPE
    }
}

/// Metadata block of a USGS summary feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Human-readable feed title (e.g. `USGS All Earthquakes, Past Week`).
    #[serde(default)]
    pub title: Option<String>,

    /// Generation time of the feed, in milliseconds since the epoch.
    #[serde(default)]
    pub generated: Option<i64>,

    /// Number of features the feed claims to contain.
    #[serde(default)]
    pub count: Option<u64>,
}

/// A single `GeoJSON` feature with a typed property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    /// Optional feature identifier (USGS event id).
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// The geometry. `null` is legal `GeoJSON` and yields `None`.
    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// The property bag. `null` is legal `GeoJSON` and yields `None`.
    #[serde(default)]
    pub properties: Option<P>,
}

/// The geometry kinds the feeds use.
///
/// Any other `GeoJSON` geometry type deserializes to [`Geometry::Unsupported`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position: `[longitude, latitude, (depth)]`.
    Point {
        /// Raw coordinate tuple.
        coordinates: Vec<f64>,
    },
    /// An ordered sequence of positions.
    LineString {
        /// Raw coordinate tuples.
        coordinates: Vec<Vec<f64>>,
    },
    /// Several independent line strings.
    MultiLineString {
        /// Raw coordinate tuples, one sequence per part.
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    /// Any geometry type the map does not draw.
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// The `GeoJSON` type name, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Properties of a USGS earthquake feature.
///
/// Every field is optional on the wire; the decoder decides which absences
/// make a feature unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuakeProperties {
    /// Event magnitude. USGS occasionally publishes `null`.
    #[serde(default)]
    pub mag: Option<f64>,

    /// Textual description of the location.
    #[serde(default)]
    pub place: Option<String>,

    /// Origin time in milliseconds since the epoch.
    #[serde(default)]
    pub time: Option<i64>,

    /// Link to the USGS event page.
    #[serde(default)]
    pub url: Option<String>,
}

/// Properties of a plate-boundary feature (PB2002 dataset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultProperties {
    /// Boundary name (e.g. `AF-AN`).
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
}
