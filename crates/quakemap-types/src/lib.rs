//! Shared type definitions for `QuakeMap`.
//!
//! This crate is the single source of truth for the values that flow through
//! the render pipeline: the raw `GeoJSON` wire format of the two feeds, the
//! decoded domain entities, the derived marker styles, the three display
//! layers, and the assembled map document handed to a render target.
//!
//! # Modules
//!
//! - [`geojson`] -- Wire types for `GeoJSON` feature collections
//! - [`model`] -- Decoded earthquake events, fault lines, and coordinates
//! - [`style`] -- Magnitude colour categories, marker styles, time intervals
//! - [`layers`] -- Point, line, and time layers built from the feeds
//! - [`map`] -- The assembled [`MapDocument`] and its controls

pub mod geojson;
pub mod layers;
pub mod map;
pub mod model;
pub mod style;

// Re-export all public types at crate root for convenience.
pub use geojson::{
    FaultProperties, Feature, FeatureCollection, FeedMetadata, Geometry, QuakeProperties,
};
pub use layers::{LineLayer, PointLayer, Polyline, Popup, QuakeMarker, TimeLayer, TimedMarker};
pub use map::{
    BaseLayer, BinCount, ControlPosition, LayerControl, Legend, LegendEntry, MapDocument,
    MapSummary, MapView, Overlay, OverlayKind, TimeControl, TimeLabelFormat,
};
pub use model::{EarthquakeEvent, FaultLine, FeedKind, LatLng, Position};
pub use style::{MagnitudeColor, MarkerStyle, TimeInterval};
