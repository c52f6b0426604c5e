//! Transit stops as reported by a nearby-stops query.

use super::error::InvalidCoordinate;
use super::geo::{GeoPoint, RawCoordinate};

/// A candidate stop near the user.
///
/// Coordinates are kept exactly as received; call [`Stop::position`] to get a
/// validated point in decimal degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Upstream identifier used for departure-board queries.
    pub external_id: String,
    /// Human-readable stop name.
    pub name: String,
    pub raw_latitude: RawCoordinate,
    pub raw_longitude: RawCoordinate,
    /// Distance computed by the upstream service, if it sent one.
    pub distance_meters: Option<f64>,
}

impl Stop {
    /// Create a stop with untagged coordinates and no server distance.
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        raw_latitude: f64,
        raw_longitude: f64,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            raw_latitude: RawCoordinate::untagged(raw_latitude),
            raw_longitude: RawCoordinate::untagged(raw_longitude),
            distance_meters: None,
        }
    }

    /// Set the server-computed distance.
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    /// Normalized, validated position of this stop.
    pub fn position(&self) -> Result<GeoPoint, InvalidCoordinate> {
        GeoPoint::from_raw(self.raw_latitude, self.raw_longitude)
    }
}
