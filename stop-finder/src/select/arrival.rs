//! Arrival-time resolution through journey details.
//!
//! A departure board names where a bus is heading but not when it gets there.
//! The journey detail lists every stop with its arrival time, but the stop
//! names rarely match the board's direction text exactly ("City Center" vs
//! "City Center Station", abbreviations, trailing municipality suffixes).
//! Matching is therefore deliberately loose: the first word of the direction,
//! lower-cased, as a substring of the stop name.

use tracing::{debug, warn};

use crate::domain::{Departure, JourneyDetail};
use crate::resrobot::TransitSource;

/// Where a displayed arrival time came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalResolution {
    /// Matched a stop in the journey detail.
    Journey(String),
    /// Taken from the departure record because the journey gave no answer.
    Hint(String),
    /// Nothing to show.
    Unknown,
}

impl ArrivalResolution {
    /// The arrival time, if one was found.
    pub fn time(&self) -> Option<&str> {
        match self {
            ArrivalResolution::Journey(t) | ArrivalResolution::Hint(t) => Some(t),
            ArrivalResolution::Unknown => None,
        }
    }
}

/// Arrival time at the first journey stop matching `direction`.
///
/// Returns `None` when the direction is blank, no stop matches, or the
/// matching stop has no arrival time.
pub fn resolve_arrival<'a>(journey: &'a JourneyDetail, direction: &str) -> Option<&'a str> {
    let token = direction.split_whitespace().next()?.to_lowercase();

    journey
        .stops
        .iter()
        .find(|stop| stop.name.to_lowercase().contains(&token))
        .and_then(|stop| stop.arrival_time.as_deref())
}

/// Resolve the arrival time for a chosen departure.
///
/// Fetches the journey detail when the departure has a reference. Fetch
/// failures are logged and treated as "no answer"; they never fail the
/// selection. Falls back to the departure's own arrival hint, then to
/// [`ArrivalResolution::Unknown`].
pub async fn resolve_departure_arrival<S>(source: &S, departure: &Departure) -> ArrivalResolution
where
    S: TransitSource + ?Sized,
{
    if let Some(reference) = departure.journey_reference.as_deref() {
        match source.journey_detail(reference).await {
            Ok(journey) => {
                if let Some(time) = resolve_arrival(&journey, &departure.direction) {
                    return ArrivalResolution::Journey(time.to_string());
                }
                debug!(
                    direction = %departure.direction,
                    stops = journey.stops.len(),
                    "no journey stop matched direction"
                );
            }
            Err(e) => {
                warn!(reference, "journey detail unavailable: {e}");
            }
        }
    }

    match &departure.arrival_hint {
        Some(hint) => ArrivalResolution::Hint(hint.clone()),
        None => ArrivalResolution::Unknown,
    }
}
