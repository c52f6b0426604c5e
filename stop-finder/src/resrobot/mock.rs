//! Canned transit data for running without ResRobot access.
//!
//! Serves one fixed stop at the query position and two bus departures
//! relative to the current local time. Journey details are not available.

use async_trait::async_trait;
use chrono::{Local, NaiveTime, TimeDelta};

use crate::domain::{Departure, JourneyDetail, RawCoordinate, Stop};

use super::convert::convert_departures;
use super::error::ResRobotError;
use super::source::{NearbyQuery, TransitSource};
use super::types::{DepartureBoardResponse, DepartureDto, OneOrMany, ProductDto};

/// External id of the canned stop.
pub const CANNED_STOP_ID: &str = "mock-1";

/// Name of the canned stop.
pub const CANNED_STOP_NAME: &str = "Mock Bus Station";

/// Server distance reported for the canned stop, in meters.
const CANNED_STOP_DISTANCE_M: f64 = 150.0;

/// Minutes between the two canned departures.
const SECOND_DEPARTURE_DELAY_MINS: i64 = 15;

/// Transit source that answers from fixed data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedSource;

impl CannedSource {
    /// The canned stop for a query: at the query point, in microdegrees.
    pub fn stops(query: &NearbyQuery) -> Vec<Stop> {
        let stop = Stop {
            external_id: CANNED_STOP_ID.to_string(),
            name: CANNED_STOP_NAME.to_string(),
            raw_latitude: RawCoordinate::microdegrees(query.position.latitude() * 1e6),
            raw_longitude: RawCoordinate::microdegrees(query.position.longitude() * 1e6),
            distance_meters: Some(CANNED_STOP_DISTANCE_M),
        };
        vec![stop]
    }

    /// The canned departure board as it would arrive over the wire.
    pub fn board(now: NaiveTime) -> DepartureBoardResponse {
        let later = now + TimeDelta::minutes(SECOND_DEPARTURE_DELAY_MINS);
        DepartureBoardResponse {
            departure: vec![
                canned_departure("Bus 1", "Local Bus", "1", "City Center", now),
                canned_departure("Bus 2", "Express Bus", "2", "Shopping Mall", later),
            ],
        }
    }

    /// The canned departures, starting at `now`.
    pub fn departures_at(now: NaiveTime) -> Vec<Departure> {
        convert_departures(&Self::board(now))
    }
}

fn canned_departure(
    name: &str,
    product: &str,
    line: &str,
    direction: &str,
    time: NaiveTime,
) -> DepartureDto {
    DepartureDto {
        name: Some(name.to_string()),
        kind: Some("BUS".to_string()),
        time: Some(time.format("%H:%M").to_string()),
        direction: direction.to_string(),
        product: Some(OneOrMany::One(ProductDto {
            name: Some(product.to_string()),
            num: Some(line.to_string()),
            line: Some(line.to_string()),
            cat_out: Some("BUS".to_string()),
            cat_out_s: Some("BUS".to_string()),
            cat_in: Some("BUS".to_string()),
            cat_code: Some("1".to_string()),
            ..ProductDto::default()
        })),
        ..DepartureDto::default()
    }
}

#[async_trait]
impl TransitSource for CannedSource {
    async fn nearby_stops(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError> {
        Ok(Self::stops(query))
    }

    async fn departures(
        &self,
        _stop_id: &str,
        _max_results: u32,
    ) -> Result<Vec<Departure>, ResRobotError> {
        Ok(Self::departures_at(Local::now().time()))
    }

    async fn journey_detail(&self, _reference: &str) -> Result<JourneyDetail, ResRobotError> {
        Err(ResRobotError::NotConfigured(
            "journey detail has no canned data".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoordinateUnit, GeoPoint};
    use crate::select::is_bus_departure;

    fn query() -> NearbyQuery {
        NearbyQuery::new(GeoPoint::new(59.3293, 18.0686).unwrap())
    }

    #[test]
    fn stop_sits_on_query_point() {
        let stops = CannedSource::stops(&query());
        assert_eq!(stops.len(), 1);

        let stop = &stops[0];
        assert_eq!(stop.external_id, "mock-1");
        assert_eq!(stop.name, "Mock Bus Station");
        assert_eq!(stop.raw_latitude.unit(), Some(CoordinateUnit::Microdegrees));
        assert_eq!(stop.distance_meters, Some(150.0));

        let p = stop.position().unwrap();
        assert!((p.latitude() - 59.3293).abs() < 1e-9);
        assert!((p.longitude() - 18.0686).abs() < 1e-9);
    }

    #[test]
    fn departures_are_two_buses() {
        let now = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let departures = CannedSource::departures_at(now);

        assert_eq!(departures.len(), 2);
        assert_eq!(departures[0].direction, "City Center");
        assert_eq!(departures[0].scheduled_time, "10:00");
        assert_eq!(departures[0].line_identifier.as_deref(), Some("1"));
        assert_eq!(departures[1].direction, "Shopping Mall");
        assert_eq!(departures[1].scheduled_time, "10:15");
        assert!(departures.iter().all(is_bus_departure));
        assert!(departures.iter().all(|d| d.journey_reference.is_none()));
    }

    #[test]
    fn second_departure_wraps_midnight() {
        let now = NaiveTime::from_hms_opt(23, 50, 0).unwrap();
        let departures = CannedSource::departures_at(now);
        assert_eq!(departures[1].scheduled_time, "00:05");
    }

    #[tokio::test]
    async fn journey_detail_is_unavailable() {
        let err = CannedSource.journey_detail("1|2|3").await.unwrap_err();
        assert!(matches!(err, ResRobotError::NotConfigured(_)));
    }
}
