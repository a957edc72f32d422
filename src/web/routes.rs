//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, warn};

use crate::error::LatenessError;
use crate::lookup::{RouteSummary, TripSummary};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes))
        .route("/trips", get(list_trips))
        .route("/lateness", get(lateness))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.lookup.get_routes())
}

async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<TripsQuery>,
) -> Json<Vec<TripSummary>> {
    if state.lookup.schedule().route(&query.route).is_none() {
        debug!(route = %query.route, "Trips requested for unknown route");
    }
    Json(state.lookup.get_trips(&query.route))
}

async fn lateness(
    State(state): State<AppState>,
    Query(query): Query<LatenessQuery>,
) -> Result<Json<LatenessResponse>, AppError> {
    if query.trip.is_empty() {
        return Err(AppError::BadRequest {
            message: "tripID is required".to_string(),
        });
    }

    let report = state.lookup.get_lateness(&query.trip).await?;
    Ok(Json(LatenessResponse::new(query.trip, report)))
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// The realtime lookup failed; the request may be retried by the caller.
    Unavailable { message: String },
}

impl From<LatenessError> for AppError {
    fn from(e: LatenessError) -> Self {
        AppError::Unavailable {
            message: format!("lateness unavailable: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        warn!(status = status.as_u16(), message = %message, "Request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
