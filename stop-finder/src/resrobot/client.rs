//! ResRobot v2.1 HTTP client.
//!
//! Provides async methods for the three ResRobot endpoints the selection
//! pipeline needs. Handles authentication, concurrency limiting, and
//! conversion to domain types.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Departure, JourneyDetail, Stop};

use super::convert::{convert_departures, convert_journey, convert_nearby_stops};
use super::error::ResRobotError;
use super::source::{NearbyQuery, TransitSource};
use super::types::{DepartureBoardResponse, JourneyDetailResponse, NearbyStopsResponse};

/// Default base URL for the ResRobot API.
const DEFAULT_BASE_URL: &str = "https://api.resrobot.se/v2.1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default timeout for stop and departure queries, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the ResRobot client.
#[derive(Debug, Clone)]
pub struct ResRobotConfig {
    /// Access id sent as the `accessId` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production ResRobot)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Timeout for nearby-stop and departure requests, in seconds
    pub timeout_secs: u64,
}

impl ResRobotConfig {
    /// Create a new config with the given access id.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the stop and departure request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ResRobot API client.
///
/// Uses a semaphore to limit concurrent requests. Journey-detail requests
/// are not given the short timeout: they run after a selection has already
/// been made and only refine the displayed arrival time.
#[derive(Debug, Clone)]
pub struct ResRobotClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    semaphore: Arc<Semaphore>,
}

impl ResRobotClient {
    /// Create a new ResRobot client with the given configuration.
    pub fn new(config: ResRobotConfig) -> Result<Self, ResRobotError> {
        if config.api_key.trim().is_empty() {
            return Err(ResRobotError::NotConfigured(
                "RESROBOT_API_KEY is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            timeout: Duration::from_secs(config.timeout_secs),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Issue a GET against `endpoint` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<T, ResRobotError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ResRobotError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, "ResRobot request");

        let mut request = self
            .http
            .get(&url)
            .query(&[("accessId", self.api_key.as_str()), ("format", "json")])
            .query(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ResRobotError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResRobotError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResRobotError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ResRobotError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Get the raw nearby-stops response.
    pub async fn nearby_stops_raw(
        &self,
        query: &NearbyQuery,
    ) -> Result<NearbyStopsResponse, ResRobotError> {
        self.get_json(
            "location.nearbystops",
            &[
                ("originCoordLat", query.position.latitude().to_string()),
                ("originCoordLong", query.position.longitude().to_string()),
                ("r", query.radius_meters.to_string()),
                ("maxNo", query.max_results.to_string()),
            ],
            Some(self.timeout),
        )
        .await
    }

    /// Get the raw departure board for a stop.
    pub async fn departures_raw(
        &self,
        stop_id: &str,
        max_results: u32,
    ) -> Result<DepartureBoardResponse, ResRobotError> {
        self.get_json(
            "departureBoard",
            &[
                ("id", stop_id.to_string()),
                ("maxJourneys", max_results.to_string()),
            ],
            Some(self.timeout),
        )
        .await
    }

    /// Get the raw journey detail behind a `JourneyDetailRef`.
    pub async fn journey_detail_raw(
        &self,
        reference: &str,
    ) -> Result<JourneyDetailResponse, ResRobotError> {
        self.get_json("journeyDetail", &[("ref", reference.to_string())], None)
            .await
    }
}

#[async_trait]
impl TransitSource for ResRobotClient {
    async fn nearby_stops(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ResRobotError> {
        let response = self.nearby_stops_raw(query).await?;
        Ok(convert_nearby_stops(&response))
    }

    async fn departures(
        &self,
        stop_id: &str,
        max_results: u32,
    ) -> Result<Vec<Departure>, ResRobotError> {
        let board = self.departures_raw(stop_id, max_results).await?;
        Ok(convert_departures(&board))
    }

    async fn journey_detail(&self, reference: &str) -> Result<JourneyDetail, ResRobotError> {
        let response = self.journey_detail_raw(reference).await?;
        Ok(convert_journey(&response))
    }
}
