//! Caching layer for transit queries.
//!
//! Nearby-stop and departure-board answers are cached briefly so repeated
//! selections from the same spot do not hit ResRobot each time. Journey
//! details are always fetched fresh.
//!
//! Positions are rounded to 4 decimal places (about 11 m) for the cache key,
//! which bounds cardinality while keeping stops accurate to well within the
//! search radius.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Departure, JourneyDetail, Stop};
use crate::resrobot::{NearbyQuery, ResRobotError, TransitSource};

/// Cache key for nearby stops: (lat × 10⁴, lon × 10⁴, radius, max results).
type StopsKey = (i64, i64, u32, u32);

/// Cache key for departure boards: (stop id, max results).
type BoardKey = (String, u32);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per query kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

fn stops_key(query: &NearbyQuery) -> StopsKey {
    let round = |v: f64| (v * 10_000.0).round() as i64;
    (
        round(query.position.latitude()),
        round(query.position.longitude()),
        query.radius_meters,
        query.max_results,
    )
}

/// Transit source with caching.
///
/// Wraps another `TransitSource`; only successful answers are cached.
pub struct CachedSource<S> {
    inner: S,
    stops: MokaCache<StopsKey, Arc<Vec<Stop>>>,
    boards: MokaCache<BoardKey, Arc<Vec<Departure>>>,
}

impl<S: TransitSource> CachedSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        let boards = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            stops,
            boards,
        }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.stops.invalidate_all();
        self.boards.invalidate_all();
    }
}

#[async_trait]
impl<S: TransitSource> TransitSource for CachedSource<S> {
    async fn nearby_stops(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError> {
        let key = stops_key(query);

        if let Some(cached) = self.stops.get(&key).await {
            debug!(position = %query.position, "nearby stops cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stops = self.inner.nearby_stops(query).await?;
        self.stops.insert(key, Arc::new(stops.clone())).await;
        Ok(stops)
    }

    async fn departures(
        &self,
        stop_id: &str,
        max_results: u32,
    ) -> Result<Vec<Departure>, ResRobotError> {
        let key = (stop_id.to_string(), max_results);

        if let Some(cached) = self.boards.get(&key).await {
            debug!(stop_id, "departure board cache hit");
            return Ok(cached.as_ref().clone());
        }

        let departures = self.inner.departures(stop_id, max_results).await?;
        self.boards.insert(key, Arc::new(departures.clone())).await;
        Ok(departures)
    }

    async fn journey_detail(&self, reference: &str) -> Result<JourneyDetail, ResRobotError> {
        self.inner.journey_detail(reference).await
    }
}
