//! Tests for the selection pipeline and async arrival resolution.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::domain::{CategoryFields, JourneyDetail, JourneyStop};
use crate::resrobot::{CannedSource, FallbackSource, ResRobotError};

fn here() -> GeoPoint {
    GeoPoint::new(59.3293, 18.0686).unwrap()
}

fn bus(time: &str, direction: &str) -> Departure {
    Departure::new(time, direction).with_categories(CategoryFields::outbound("BUS"))
}

fn train(time: &str, direction: &str) -> Departure {
    Departure::new(time, direction).with_categories(CategoryFields::outbound("TRAIN"))
}

/// In-memory transit source.
#[derive(Default)]
struct FakeSource {
    stops: Vec<Stop>,
    boards: HashMap<String, Vec<Departure>>,
    journeys: HashMap<String, JourneyDetail>,
    fail_stops: bool,
    fail_boards: bool,
    board_requests: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    fn with_board(mut self, stop_id: &str, departures: Vec<Departure>) -> Self {
        self.boards.insert(stop_id.to_string(), departures);
        self
    }

    fn with_journey(mut self, reference: &str, journey: JourneyDetail) -> Self {
        self.journeys.insert(reference.to_string(), journey);
        self
    }
}

#[async_trait]
impl TransitSource for FakeSource {
    async fn nearby_stops(&self, _: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError> {
        if self.fail_stops {
            return Err(ResRobotError::RateLimited);
        }
        Ok(self.stops.clone())
    }

    async fn departures(&self, stop_id: &str, _: u32) -> Result<Vec<Departure>, ResRobotError> {
        self.board_requests.lock().unwrap().push(stop_id.to_string());
        if self.fail_boards {
            return Err(ResRobotError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(self.boards.get(stop_id).cloned().unwrap_or_default())
    }

    async fn journey_detail(&self, reference: &str) -> Result<JourneyDetail, ResRobotError> {
        self.journeys
            .get(reference)
            .cloned()
            .ok_or_else(|| ResRobotError::Api {
                status: 404,
                message: format!("no journey {reference}"),
            })
    }
}

fn city_journey() -> JourneyDetail {
    JourneyDetail::new(vec![
        JourneyStop::new("Kungsträdgården", None),
        JourneyStop::new("Odenplan", Some("10:07")),
        JourneyStop::new("City Center Station", Some("10:21")),
    ])
}

#[tokio::test]
async fn picks_nearest_stop_then_nth_bus() {
    let source = FakeSource::default()
        .with_stops(vec![
            Stop::new("far", "Far Stop", 59.40, 18.10),
            Stop::new("near", "Near Stop", 59_330_800.0, 18_068_600.0),
        ])
        .with_board(
            "near",
            vec![
                train("10:00", "Mall"),
                bus("10:02", "Center").with_journey_reference("j1"),
                bus("10:09", "Airport"),
            ],
        )
        .with_journey("j1", city_journey());

    let result = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap();

    assert_eq!(result.chosen_stop.external_id, "near");
    assert!(result.stop_distance_meters < 200.0);
    assert_eq!(result.chosen_departure.direction, "Center");
    assert_eq!(result.arrival, ArrivalResolution::Journey("10:21".into()));
    assert_eq!(*source.board_requests.lock().unwrap(), vec!["near"]);
}

#[tokio::test]
async fn second_bus_with_journey_arrival() {
    let source = FakeSource::default()
        .with_stops(vec![Stop::new("s", "Stop", 59.33, 18.07)])
        .with_board(
            "s",
            vec![
                bus("10:00", "Solna"),
                bus("10:05", "City Center").with_journey_reference("j1"),
            ],
        )
        .with_journey("j1", city_journey());

    let request = SelectionRequest::new(here()).with_ordinal(2);
    let result = run_selection(&source, &request).await.unwrap();

    assert_eq!(result.chosen_departure.scheduled_time, "10:05");
    assert_eq!(result.arrival, ArrivalResolution::Journey("10:21".into()));
    assert_eq!(result.resolved_arrival_time(), Some("10:21"));
}

#[tokio::test]
async fn no_valid_stop() {
    let source = FakeSource::default().with_stops(vec![Stop::new("zero", "Null Island", 0.0, 0.0)]);
    let err = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SelectionError::NoValidStop {
            examined: 1,
            rejected: 1
        }
    );
    assert!(source.board_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn no_bus_departures() {
    let source = FakeSource::default()
        .with_stops(vec![Stop::new("s", "Tåg Station", 59.33, 18.07)])
        .with_board("s", vec![train("10:00", "Uppsala")]);

    let err = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SelectionError::NoBusDepartures {
            stop: "Tåg Station".into()
        }
    );
}

#[tokio::test]
async fn ordinal_out_of_range() {
    let source = FakeSource::default()
        .with_stops(vec![Stop::new("s", "Stop", 59.33, 18.07)])
        .with_board("s", vec![bus("10:00", "A"), bus("10:10", "B")]);

    let request = SelectionRequest::new(here()).with_ordinal(3);
    let err = run_selection(&source, &request).await.unwrap_err();
    assert_eq!(
        err,
        SelectionError::OrdinalOutOfRange {
            ordinal: 3,
            available: 2
        }
    );
}

#[tokio::test]
async fn upstream_failures_are_reported() {
    let source = FakeSource {
        fail_stops: true,
        ..FakeSource::default()
    };
    let err = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap_err();
    assert!(matches!(err, SelectionError::Upstream(_)));

    let source = FakeSource {
        fail_boards: true,
        ..FakeSource::default().with_stops(vec![Stop::new("s", "Stop", 59.33, 18.07)])
    };
    let err = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap_err();
    assert!(matches!(err, SelectionError::Upstream(msg) if msg.contains("503")));
}

#[tokio::test]
async fn custom_classifier_is_used() {
    struct TrainsPlease;
    impl DepartureClassifier for TrainsPlease {
        fn is_bus(&self, d: &Departure) -> bool {
            d.categories.outbound_category.as_deref() == Some("TRAIN")
        }
    }

    let source = FakeSource::default()
        .with_stops(vec![Stop::new("s", "Stop", 59.33, 18.07)])
        .with_board("s", vec![bus("10:00", "A"), train("10:03", "Uppsala")]);

    let result = run_selection_with(&source, &TrainsPlease, &SelectionRequest::new(here()))
        .await
        .unwrap();
    assert_eq!(result.chosen_departure.direction, "Uppsala");
}

#[tokio::test]
async fn canned_fallback_runs_end_to_end() {
    let source = FallbackSource::new(FakeSource {
        fail_stops: true,
        fail_boards: true,
        ..FakeSource::default()
    });

    let result = run_selection(&source, &SelectionRequest::new(here()))
        .await
        .unwrap();

    assert_eq!(result.chosen_stop.name, "Mock Bus Station");
    assert!(result.stop_distance_meters < 1.0);
    assert_eq!(result.chosen_departure.direction, "City Center");
    assert_eq!(result.arrival, ArrivalResolution::Unknown);
}

#[tokio::test]
async fn dyn_source_is_accepted() {
    let source: Box<dyn TransitSource> = Box::new(CannedSource);
    let request = SelectionRequest::new(here()).with_ordinal(2);
    let result = run_selection(source.as_ref(), &request).await.unwrap();
    assert_eq!(result.chosen_departure.direction, "Shopping Mall");
}

#[test]
fn request_builders() {
    let request = SelectionRequest::new(here())
        .with_ordinal(4)
        .with_radius(250)
        .with_max_stops(3)
        .with_max_departures(20);

    assert_eq!(request.ordinal, 4);
    assert_eq!(request.max_departures, 20);

    let query = request.nearby_query();
    assert_eq!(query.radius_meters, 250);
    assert_eq!(query.max_results, 3);
    assert_eq!(query.position, here());
}

mod arrival_resolution {
    use super::*;

    #[tokio::test]
    async fn journey_match_wins_over_hint() {
        let source = FakeSource::default().with_journey("j1", city_journey());
        let d = bus("10:00", "Odenplan")
            .with_journey_reference("j1")
            .with_arrival_hint("10:30");

        let resolution = resolve_departure_arrival(&source, &d).await;
        assert_eq!(resolution, ArrivalResolution::Journey("10:07".into()));
    }

    #[tokio::test]
    async fn no_match_falls_back_to_hint() {
        let source = FakeSource::default().with_journey("j1", city_journey());
        let d = bus("10:00", "Shopping Mall")
            .with_journey_reference("j1")
            .with_arrival_hint("10:30");

        let resolution = resolve_departure_arrival(&source, &d).await;
        assert_eq!(resolution, ArrivalResolution::Hint("10:30".into()));
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_unknown() {
        let source = FakeSource::default();
        let d = bus("10:00", "Odenplan").with_journey_reference("missing");

        let resolution = resolve_departure_arrival(&source, &d).await;
        assert_eq!(resolution, ArrivalResolution::Unknown);
    }

    #[tokio::test]
    async fn no_reference_uses_hint_without_fetching() {
        let source = FakeSource::default();
        let d = bus("10:00", "Odenplan").with_arrival_hint("10:30");

        let resolution = resolve_departure_arrival(&source, &d).await;
        assert_eq!(resolution, ArrivalResolution::Hint("10:30".into()));
    }
}
