//! Geographic coordinates, unit normalization and great-circle distance.
//!
//! Upstream stop records carry latitude/longitude as bare numbers. Depending on
//! the API version (and on whether a canned fallback answered), the same field
//! may hold decimal degrees or microdegrees (degrees × 10⁶). When the source
//! knows the unit it tags the value; otherwise [`normalize`] guesses from the
//! magnitude.

use std::fmt;

use super::error::InvalidCoordinate;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Number of microdegrees in one degree.
pub const MICRODEGREES_PER_DEGREE: f64 = 1_000_000.0;

/// Values with a magnitude below this are treated as over-reduced and scaled
/// back up by 10⁶.
pub const UNDERSCALED_THRESHOLD: f64 = 0.2;

/// Values with a magnitude above this cannot be degrees and are treated as
/// microdegrees.
pub const MICRODEGREE_THRESHOLD: f64 = 180.0;

/// Convert an untagged coordinate value to decimal degrees.
///
/// This is a best-effort magnitude heuristic, not a unit detector: a genuine
/// decimal-degree value close to zero (|v| < 0.2) is indistinguishable from a
/// microdegree value that was divided one time too many, and is scaled up.
///
/// ```
/// use stop_finder::domain::normalize;
///
/// assert_eq!(normalize(59.3293), 59.3293);
/// assert!((normalize(59_330_800.0) - 59.3308).abs() < 1e-9);
/// ```
pub fn normalize(value: f64) -> f64 {
    let magnitude = value.abs();
    if magnitude < UNDERSCALED_THRESHOLD {
        value * MICRODEGREES_PER_DEGREE
    } else if magnitude > MICRODEGREE_THRESHOLD {
        value / MICRODEGREES_PER_DEGREE
    } else {
        value
    }
}

/// Check that a latitude/longitude pair is plausible.
///
/// Rejects NaN, out-of-range values, and the `(0, 0)` sentinel that upstream
/// services emit for missing positions.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    if latitude.is_nan() || longitude.is_nan() {
        return false;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return false;
    }
    !(latitude == 0.0 && longitude == 0.0)
}

/// Unit of a raw coordinate value, when the source knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateUnit {
    Degrees,
    Microdegrees,
}

/// A coordinate value as received from upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoordinate {
    value: f64,
    unit: Option<CoordinateUnit>,
}

impl RawCoordinate {
    /// A value whose unit must be inferred.
    pub fn untagged(value: f64) -> Self {
        Self { value, unit: None }
    }

    /// A value known to be in decimal degrees.
    pub fn degrees(value: f64) -> Self {
        Self {
            value,
            unit: Some(CoordinateUnit::Degrees),
        }
    }

    /// A value known to be in microdegrees.
    pub fn microdegrees(value: f64) -> Self {
        Self {
            value,
            unit: Some(CoordinateUnit::Microdegrees),
        }
    }

    /// The value exactly as received.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit tag, if any.
    pub fn unit(&self) -> Option<CoordinateUnit> {
        self.unit
    }

    /// Decimal degrees, trusting the unit tag when present.
    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            Some(CoordinateUnit::Degrees) => self.value,
            Some(CoordinateUnit::Microdegrees) => self.value / MICRODEGREES_PER_DEGREE,
            None => normalize(self.value),
        }
    }
}

/// A validated position in decimal degrees.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], neither is NaN,
/// and the point is not `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if is_valid_coordinate(latitude, longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Create a point from two raw, possibly untagged values.
    pub fn from_raw(
        latitude: RawCoordinate,
        longitude: RawCoordinate,
    ) -> Result<Self, InvalidCoordinate> {
        Self::new(latitude.to_degrees(), longitude.to_degrees())
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Decimal degrees outside the heuristic's ambiguous band.
    fn unambiguous_degrees() -> impl Strategy<Value = f64> {
        prop_oneof![0.2f64..=180.0, -180.0f64..=-0.2]
    }

    fn valid_point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_filter("not the sentinel", |(lat, lon)| !(*lat == 0.0 && *lon == 0.0))
            .prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent_on_degrees(x in unambiguous_degrees()) {
            prop_assert_eq!(normalize(normalize(x)), normalize(x));
        }

        #[test]
        fn normalize_recovers_microdegrees(x in unambiguous_degrees()) {
            let micro = (x * MICRODEGREES_PER_DEGREE).round();
            prop_assume!(micro.abs() > MICRODEGREE_THRESHOLD);
            prop_assert!((normalize(micro) - x).abs() < 1e-6);
        }

        #[test]
        fn distance_to_self_is_zero(p in valid_point()) {
            prop_assert_eq!(distance_meters(p, p), 0.0);
        }

        #[test]
        fn distance_is_symmetric(a in valid_point(), b in valid_point()) {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "{} vs {}", ab, ba);
        }

        #[test]
        fn distance_is_bounded(a in valid_point(), b in valid_point()) {
            let d = distance_meters(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_M * std::f64::consts::PI + 1e-6);
        }
    }
}
