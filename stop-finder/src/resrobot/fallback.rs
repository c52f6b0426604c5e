//! Canned-data fallback around a live source.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{Departure, JourneyDetail, Stop};

use super::error::ResRobotError;
use super::mock::CannedSource;
use super::source::{NearbyQuery, TransitSource};

/// Answers nearby-stop and departure queries from [`CannedSource`] when the
/// primary source fails.
///
/// Journey-detail failures are passed through: there is no canned journey,
/// and arrival resolution already degrades gracefully without one.
#[derive(Debug, Clone)]
pub struct FallbackSource<P> {
    primary: P,
    canned: CannedSource,
}

impl<P: TransitSource> FallbackSource<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            canned: CannedSource,
        }
    }
}

#[async_trait]
impl<P: TransitSource> TransitSource for FallbackSource<P> {
    async fn nearby_stops(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError> {
        match self.primary.nearby_stops(query).await {
            Ok(stops) => Ok(stops),
            Err(e) => {
                warn!("nearby stops failed, serving canned stop: {e}");
                self.canned.nearby_stops(query).await
            }
        }
    }

    async fn departures(
        &self,
        stop_id: &str,
        max_results: u32,
    ) -> Result<Vec<Departure>, ResRobotError> {
        match self.primary.departures(stop_id, max_results).await {
            Ok(departures) => Ok(departures),
            Err(e) => {
                warn!(stop_id, "departure board failed, serving canned departures: {e}");
                self.canned.departures(stop_id, max_results).await
            }
        }
    }

    async fn journey_detail(&self, reference: &str) -> Result<JourneyDetail, ResRobotError> {
        self.primary.journey_detail(reference).await
    }
}
