//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the computation.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};

use super::dto::{GetObjRequest, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::SkyPosition;
use crate::services::{compute_position, PositionRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html("<p>Use the API</p>")
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ephemeris: state.ephemeris.dataset().to_string(),
    }))
}

/// POST /api/get-obj
///
/// Altitude, azimuth and angular radius of a body at one instant, or a
/// 48-sample alt/az series when `timespan` is `"day"`.
pub async fn get_obj(
    State(state): State<AppState>,
    payload: Result<Json<GetObjRequest>, JsonRejection>,
) -> HandlerResult<SkyPosition> {
    let Json(body) = payload?;

    let request = PositionRequest::parse(
        body.lat,
        body.lon,
        &body.target,
        &body.time,
        body.timespan_str(),
    )?;

    // The series mode is 48 ephemeris evaluations; keep it off the reactor.
    let ephemeris = state.ephemeris.clone();
    let position = tokio::task::spawn_blocking(move || {
        compute_position(ephemeris.as_ref(), &request)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(position))
}
