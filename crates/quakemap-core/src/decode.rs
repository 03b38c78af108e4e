//! Decoding feed bodies into typed earthquake events and fault lines.
//!
//! A body that is not a JSON feature collection is a hard error. Inside a
//! valid collection, each feature is decoded on its own: a malformed feature
//! is skipped with a warning and counted in the [`DecodeReport`], never
//! propagated as a failure.

use chrono::DateTime;
use quakemap_types::{
    EarthquakeEvent, FaultLine, FaultProperties, Feature, FeatureCollection, FeedKind,
    FeedMetadata, Geometry, Position, QuakeProperties,
};
use tracing::{debug, warn};

use crate::error::QuakeMapError;

/// Place text used when a feed omits it.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Accepted and skipped feature counts for one feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Features decoded successfully.
    pub accepted: usize,
    /// Features skipped as malformed.
    pub skipped: usize,
}

/// The outcome of decoding one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Successfully decoded entities, in feed order.
    pub items: Vec<T>,
    /// Counts.
    pub report: DecodeReport,
    /// Feed metadata, when the document carries any.
    pub metadata: Option<FeedMetadata>,
}

/// Why a single feature was skipped.
#[derive(Debug, thiserror::Error)]
enum SkipReason {
    #[error("feature does not match the feed schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unexpected {0} geometry")]
    WrongGeometry(&'static str),

    #[error("coordinates are missing or not finite")]
    BadCoordinates,

    #[error("line has fewer than two vertices")]
    DegeneratePath,

    #[error("feature has no properties")]
    MissingProperties,

    #[error("magnitude is missing")]
    MissingMagnitude,

    #[error("magnitude {0} is not finite")]
    NonFiniteMagnitude(f64),

    #[error("origin time is missing")]
    MissingTime,

    #[error("origin time {0} is out of range")]
    TimeOutOfRange(i64),
}

/// Decode the earthquake feed.
///
/// # Errors
///
/// Returns [`QuakeMapError::Decode`] if the body is not JSON of the
/// collection shape, or [`QuakeMapError::NotFeatureCollection`] if its type
/// tag is wrong.
pub fn decode_earthquakes(body: &str) -> Result<Decoded<EarthquakeEvent>, QuakeMapError> {
    decode_feed(body, FeedKind::Earthquakes, earthquake_from_feature)
}

/// Decode the fault-line feed.
///
/// # Errors
///
/// Same conditions as [`decode_earthquakes`].
pub fn decode_fault_lines(body: &str) -> Result<Decoded<FaultLine>, QuakeMapError> {
    decode_feed(body, FeedKind::FaultLines, fault_line_from_feature)
}

fn decode_feed<T>(
    body: &str,
    feed: FeedKind,
    decode_one: fn(serde_json::Value) -> Result<T, SkipReason>,
) -> Result<Decoded<T>, QuakeMapError> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|source| QuakeMapError::Decode { feed, source })?;

    if !collection.is_feature_collection() {
        return Err(QuakeMapError::NotFeatureCollection {
            feed,
            found: collection.kind,
        });
    }

    let mut items = Vec::with_capacity(collection.features.len());
    let mut report = DecodeReport::default();

    for (index, raw) in collection.features.into_iter().enumerate() {
        match decode_one(raw) {
            Ok(item) => {
                items.push(item);
                report.accepted = report.accepted.saturating_add(1);
            }
            Err(reason) => {
                warn!(%feed, index, %reason, "skipping malformed feature");
                report.skipped = report.skipped.saturating_add(1);
            }
        }
    }

    debug!(
        %feed,
        accepted = report.accepted,
        skipped = report.skipped,
        "feed decoded"
    );

    Ok(Decoded {
        items,
        report,
        metadata: collection.metadata,
    })
}

fn earthquake_from_feature(raw: serde_json::Value) -> Result<EarthquakeEvent, SkipReason> {
    let feature: Feature<QuakeProperties> = serde_json::from_value(raw)?;

    let coordinates = match feature.geometry {
        Some(Geometry::Point { coordinates }) => coordinates,
        Some(other) => return Err(SkipReason::WrongGeometry(other.type_name())),
        None => return Err(SkipReason::MissingGeometry),
    };
    let position = Position::from_coordinates(&coordinates).ok_or(SkipReason::BadCoordinates)?;
    let depth_km = coordinates.get(2).copied().filter(|d| d.is_finite());

    let properties = feature.properties.ok_or(SkipReason::MissingProperties)?;
    let magnitude = properties.mag.ok_or(SkipReason::MissingMagnitude)?;
    if !magnitude.is_finite() {
        return Err(SkipReason::NonFiniteMagnitude(magnitude));
    }
    let time_ms = properties.time.ok_or(SkipReason::MissingTime)?;
    if DateTime::from_timestamp_millis(time_ms).is_none() {
        return Err(SkipReason::TimeOutOfRange(time_ms));
    }

    Ok(EarthquakeEvent {
        id: feature.id.as_ref().and_then(id_to_string),
        position,
        depth_km,
        time_ms,
        magnitude,
        place: properties
            .place
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_owned()),
        url: properties.url,
    })
}

fn fault_line_from_feature(raw: serde_json::Value) -> Result<FaultLine, SkipReason> {
    let feature: Feature<FaultProperties> = serde_json::from_value(raw)?;

    let raw_paths = match feature.geometry {
        Some(Geometry::LineString { coordinates }) => vec![coordinates],
        Some(Geometry::MultiLineString { coordinates }) => coordinates,
        Some(other) => return Err(SkipReason::WrongGeometry(other.type_name())),
        None => return Err(SkipReason::MissingGeometry),
    };

    let paths = raw_paths
        .iter()
        .map(|path| read_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    if paths.is_empty() {
        return Err(SkipReason::DegeneratePath);
    }

    Ok(FaultLine {
        name: feature.properties.and_then(|p| p.name),
        paths,
    })
}

fn read_path(raw: &[Vec<f64>]) -> Result<Vec<Position>, SkipReason> {
    let path = raw
        .iter()
        .map(|coordinates| Position::from_coordinates(coordinates))
        .collect::<Option<Vec<_>>>()
        .ok_or(SkipReason::BadCoordinates)?;
    if path.len() < 2 {
        return Err(SkipReason::DegeneratePath);
    }
    Ok(path)
}

fn id_to_string(id: &serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
