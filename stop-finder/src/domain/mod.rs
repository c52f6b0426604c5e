//! Domain types for the stop finder.
//!
//! Value objects built fresh from each upstream response: stops with their
//! raw coordinates, departures with their overlapping mode hints, and the
//! stop sequence of a journey. Positions are validated at construction, so
//! code that receives a [`GeoPoint`] can trust it.

mod departure;
mod error;
mod geo;
mod journey;
mod stop;

pub use departure::{CategoryFields, Departure};
pub use error::InvalidCoordinate;
pub use geo::{
    CoordinateUnit, EARTH_RADIUS_M, GeoPoint, MICRODEGREE_THRESHOLD, MICRODEGREES_PER_DEGREE,
    RawCoordinate, UNDERSCALED_THRESHOLD, distance_meters, is_valid_coordinate, normalize,
};
pub use journey::{JourneyDetail, JourneyStop};
pub use stop::Stop;
