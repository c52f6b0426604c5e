//! The data-source seam between selection and the outside world.

use async_trait::async_trait;

use crate::domain::{Departure, GeoPoint, JourneyDetail, Stop};

use super::error::ResRobotError;

/// Default search radius for nearby stops, in meters.
pub const DEFAULT_RADIUS_METERS: u32 = 1000;

/// Default number of nearby stops to request.
pub const DEFAULT_MAX_STOPS: u32 = 10;

/// Parameters for a nearby-stops query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub position: GeoPoint,
    pub radius_meters: u32,
    pub max_results: u32,
}

impl NearbyQuery {
    pub fn new(position: GeoPoint) -> Self {
        Self {
            position,
            radius_meters: DEFAULT_RADIUS_METERS,
            max_results: DEFAULT_MAX_STOPS,
        }
    }

    pub fn with_radius(mut self, meters: u32) -> Self {
        self.radius_meters = meters;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }
}

/// Anything that can answer the three transit queries selection needs.
///
/// Implemented by the live ResRobot client, the canned fallback, and the
/// caching and fallback wrappers, so they compose freely.
#[async_trait]
pub trait TransitSource: Send + Sync {
    /// Stops near a position, in upstream order.
    async fn nearby_stops(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError>;

    /// Upcoming departures from a stop, in upstream order.
    async fn departures(
        &self,
        stop_id: &str,
        max_results: u32,
    ) -> Result<Vec<Departure>, ResRobotError>;

    /// Stop sequence of the journey behind a departure.
    async fn journey_detail(&self, reference: &str) -> Result<JourneyDetail, ResRobotError>;
}
