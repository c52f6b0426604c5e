//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Departure, JourneyDetail, Stop};
use crate::select::{ArrivalResolution, SelectionResult, is_bus_departure};

/// Query for nearby stops.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStopsParams {
    /// Latitude in decimal degrees
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    pub lng: Option<f64>,

    /// Search radius in meters (default 1000)
    pub radius: Option<u32>,

    /// Maximum stops to return (default 10)
    pub max_results: Option<u32>,
}

/// Query for a stop's departure board.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesParams {
    /// Stop external id
    pub stop_id: Option<String>,

    /// Maximum departures to return (default 10)
    pub max_results: Option<u32>,
}

/// Query for a journey's stop sequence.
#[derive(Debug, Deserialize)]
pub struct JourneyDetailParams {
    /// Journey reference from a departure
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

/// Query for a full selection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Which bus to show, counting from 1 (default 1)
    pub ordinal: Option<usize>,

    pub radius: Option<u32>,
    pub max_results: Option<u32>,
}

/// A stop in API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopResult {
    pub id: String,
    pub name: String,

    /// Normalized latitude; absent when the stop's coordinates are unusable
    pub latitude: Option<f64>,

    /// Normalized longitude; absent when the stop's coordinates are unusable
    pub longitude: Option<f64>,

    /// Distance reported by the upstream service
    pub distance_meters: Option<f64>,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        let position = stop.position().ok();
        Self {
            id: stop.external_id.clone(),
            name: stop.name.clone(),
            latitude: position.map(|p| p.latitude()),
            longitude: position.map(|p| p.longitude()),
            distance_meters: stop.distance_meters,
        }
    }
}

/// Response for nearby stops.
#[derive(Debug, Serialize)]
pub struct NearbyStopsResponse {
    pub stops: Vec<StopResult>,
}

/// A departure in API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureResult {
    /// Scheduled departure, "HH:MM"
    pub time: String,
    pub direction: String,
    pub line: Option<String>,
    pub line_name: Option<String>,

    /// Whether the default heuristic counts this as a bus
    pub is_bus: bool,

    pub journey_ref: Option<String>,
    pub arrival_hint: Option<String>,
}

impl DepartureResult {
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            time: departure.scheduled_time.clone(),
            direction: departure.direction.clone(),
            line: departure.line_identifier.clone(),
            line_name: departure.line_name.clone(),
            is_bus: is_bus_departure(departure),
            journey_ref: departure.journey_reference.clone(),
            arrival_hint: departure.arrival_hint.clone(),
        }
    }
}

/// Response for a departure board.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub departures: Vec<DepartureResult>,
}

/// A stop along a journey.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStopResult {
    pub name: String,
    pub arrival_time: Option<String>,
}

/// Response for a journey detail.
#[derive(Debug, Serialize)]
pub struct JourneyDetailResponse {
    pub stops: Vec<JourneyStopResult>,
}

impl From<JourneyDetail> for JourneyDetailResponse {
    fn from(journey: JourneyDetail) -> Self {
        Self {
            stops: journey
                .stops
                .into_iter()
                .map(|s| JourneyStopResult {
                    name: s.name,
                    arrival_time: s.arrival_time,
                })
                .collect(),
        }
    }
}

/// Where a displayed arrival time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalSource {
    Journey,
    Hint,
    Unknown,
}

/// A completed selection as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    /// Request ticket; higher tickets are newer requests
    pub ticket: u64,

    /// True when a newer selection started before this one finished
    pub superseded: bool,

    pub stop: StopResult,

    /// Haversine distance from the user to the stop
    pub stop_distance_meters: f64,

    pub departure: DepartureResult,
    pub arrival_time: Option<String>,
    pub arrival_source: ArrivalSource,
}

impl SelectionResponse {
    pub fn from_result(ticket: u64, result: &SelectionResult) -> Self {
        let arrival_source = match result.arrival {
            ArrivalResolution::Journey(_) => ArrivalSource::Journey,
            ArrivalResolution::Hint(_) => ArrivalSource::Hint,
            ArrivalResolution::Unknown => ArrivalSource::Unknown,
        };
        Self {
            ticket,
            superseded: false,
            stop: StopResult::from_stop(&result.chosen_stop),
            stop_distance_meters: result.stop_distance_meters,
            departure: DepartureResult::from_departure(&result.chosen_departure),
            arrival_time: result.resolved_arrival_time().map(str::to_string),
            arrival_source,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
