//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{GeoPoint, InvalidCoordinate};
use crate::resrobot::{NearbyQuery, ResRobotError};
use crate::select::{SelectionError, SelectionRequest, run_selection};

use super::dto::*;
use super::state::AppState;

/// Default number of departures to return from a board.
const DEFAULT_MAX_DEPARTURES: u32 = 10;

/// Create the application router.
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/nearby-stops", get(nearby_stops))
        .route("/api/departures", get(departures))
        .route("/api/journey-detail", get(journey_detail))
        .route("/api/selection", get(selection))
        .route("/api/selection/current", get(current_selection));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn position(lat: Option<f64>, lng: Option<f64>) -> Result<GeoPoint, AppError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(AppError::BadRequest {
            message: "lat and lng are required".to_string(),
        });
    };
    Ok(GeoPoint::new(lat, lng)?)
}

/// Stops near a position.
async fn nearby_stops(
    State(state): State<AppState>,
    query: Result<Query<NearbyStopsParams>, QueryRejection>,
) -> Result<Json<NearbyStopsResponse>, AppError> {
    let Query(req) = query?;
    let mut query = NearbyQuery::new(position(req.lat, req.lng)?);
    if let Some(radius) = req.radius {
        query = query.with_radius(radius);
    }
    if let Some(n) = req.max_results {
        query = query.with_max_results(n);
    }

    let stops = state.source.nearby_stops(&query).await?;

    Ok(Json(NearbyStopsResponse {
        stops: stops.iter().map(StopResult::from_stop).collect(),
    }))
}

/// Departure board for a stop.
async fn departures(
    State(state): State<AppState>,
    query: Result<Query<DeparturesParams>, QueryRejection>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let Query(req) = query?;
    let stop_id = req
        .stop_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "stopId is required".to_string(),
        })?;

    let departures = state
        .source
        .departures(&stop_id, req.max_results.unwrap_or(DEFAULT_MAX_DEPARTURES))
        .await?;

    Ok(Json(DeparturesResponse {
        departures: departures
            .iter()
            .map(DepartureResult::from_departure)
            .collect(),
    }))
}

/// Stop sequence of one journey.
async fn journey_detail(
    State(state): State<AppState>,
    query: Result<Query<JourneyDetailParams>, QueryRejection>,
) -> Result<Json<JourneyDetailResponse>, AppError> {
    let Query(req) = query?;
    let reference = req
        .reference
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "ref is required".to_string(),
        })?;

    let journey = state.source.journey_detail(&reference).await?;
    Ok(Json(journey.into()))
}

/// Run a selection and put it on display.
async fn selection(
    State(state): State<AppState>,
    query: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Json<SelectionResponse>, AppError> {
    let Query(req) = query?;
    let mut request = SelectionRequest::new(position(req.lat, req.lng)?);
    if let Some(ordinal) = req.ordinal {
        request = request.with_ordinal(ordinal);
    }
    if let Some(radius) = req.radius {
        request = request.with_radius(radius);
    }
    if let Some(n) = req.max_results {
        request = request.with_max_stops(n);
    }

    let ticket = state.board.begin();
    debug!(ticket, position = %request.position, ordinal = request.ordinal, "selection started");

    let result = run_selection(state.source.as_ref(), &request).await?;
    let response = state
        .board
        .publish(SelectionResponse::from_result(ticket, &result))
        .await;

    Ok(Json(response))
}

/// The selection currently on display.
async fn current_selection(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError> {
    state
        .board
        .current()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: "no selection on display".to_string(),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

/// Malformed query strings get the same JSON error body as other 400s.
impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<InvalidCoordinate> for AppError {
    fn from(e: InvalidCoordinate) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ResRobotError> for AppError {
    fn from(e: ResRobotError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::Upstream(_) => AppError::BadGateway {
                message: e.to_string(),
            },
            SelectionError::NoValidStop { .. }
            | SelectionError::NoBusDepartures { .. }
            | SelectionError::OrdinalOutOfRange { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, "{message}");
        } else {
            debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
