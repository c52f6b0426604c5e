//! One user-triggered selection, end to end.
//!
//! nearby stops → nearest stop → departure board → buses → Nth bus →
//! arrival time.

use tracing::{debug, info};

use crate::domain::{Departure, GeoPoint, Stop};
use crate::resrobot::{NearbyQuery, TransitSource};

use super::arrival::{ArrivalResolution, resolve_departure_arrival};
use super::classify::{BusHeuristic, DepartureClassifier, filter_with};
use super::error::SelectionError;
use super::nearest::select_nearest;
use super::ordinal::select_nth;

/// Default number of departures to request from the board.
pub const DEFAULT_MAX_DEPARTURES: u32 = 10;

/// Parameters for one selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRequest {
    /// Where the user is.
    pub position: GeoPoint,
    /// Which bus to show, counting from 1.
    pub ordinal: usize,
    /// Nearby-stop search radius in meters.
    pub radius_meters: u32,
    /// Maximum nearby stops to consider.
    pub max_stops: u32,
    /// Maximum departures to request from the chosen stop.
    pub max_departures: u32,
}

impl SelectionRequest {
    /// Request the first bus with default search parameters.
    pub fn new(position: GeoPoint) -> Self {
        let nearby = NearbyQuery::new(position);
        Self {
            position,
            ordinal: 1,
            radius_meters: nearby.radius_meters,
            max_stops: nearby.max_results,
            max_departures: DEFAULT_MAX_DEPARTURES,
        }
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn with_radius(mut self, meters: u32) -> Self {
        self.radius_meters = meters;
        self
    }

    pub fn with_max_stops(mut self, n: u32) -> Self {
        self.max_stops = n;
        self
    }

    pub fn with_max_departures(mut self, n: u32) -> Self {
        self.max_departures = n;
        self
    }

    fn nearby_query(&self) -> NearbyQuery {
        NearbyQuery::new(self.position)
            .with_radius(self.radius_meters)
            .with_max_results(self.max_stops)
    }
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub chosen_stop: Stop,
    /// Haversine distance from the user to the chosen stop.
    pub stop_distance_meters: f64,
    pub chosen_departure: Departure,
    pub arrival: ArrivalResolution,
}

impl SelectionResult {
    /// The arrival time to display, if any.
    pub fn resolved_arrival_time(&self) -> Option<&str> {
        self.arrival.time()
    }
}

/// Run a selection with the default bus heuristic.
pub async fn run_selection<S>(
    source: &S,
    request: &SelectionRequest,
) -> Result<SelectionResult, SelectionError>
where
    S: TransitSource + ?Sized,
{
    run_selection_with(source, &BusHeuristic, request).await
}

/// Run a selection with a custom departure classifier.
///
/// Nearby-stop and departure-board failures become
/// [`SelectionError::Upstream`]. Journey-detail failures never fail the
/// selection; they only degrade the arrival time.
pub async fn run_selection_with<S, C>(
    source: &S,
    classifier: &C,
    request: &SelectionRequest,
) -> Result<SelectionResult, SelectionError>
where
    S: TransitSource + ?Sized,
    C: DepartureClassifier + Sync + ?Sized,
{
    let stops = source
        .nearby_stops(&request.nearby_query())
        .await
        .map_err(|e| SelectionError::Upstream(e.to_string()))?;
    debug!(count = stops.len(), "nearby stops received");

    let nearest = select_nearest(&stops, request.position)?;
    let stop = nearest.stop.clone();
    let stop_distance_meters = nearest.distance_meters;

    let departures = source
        .departures(&stop.external_id, request.max_departures)
        .await
        .map_err(|e| SelectionError::Upstream(e.to_string()))?;
    let total = departures.len();

    let buses = filter_with(classifier, departures);
    debug!(stop_id = %stop.external_id, total, buses = buses.len(), "departures filtered");
    if buses.is_empty() {
        return Err(SelectionError::NoBusDepartures { stop: stop.name });
    }

    let departure = select_nth(&buses, request.ordinal)?.clone();
    let arrival = resolve_departure_arrival(source, &departure).await;

    info!(
        stop = %stop.name,
        distance = stop_distance_meters.round(),
        departs = %departure.scheduled_time,
        direction = %departure.direction,
        arrives = arrival.time().unwrap_or("unknown"),
        "selection complete"
    );

    Ok(SelectionResult {
        chosen_stop: stop,
        stop_distance_meters,
        chosen_departure: departure,
        arrival,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
