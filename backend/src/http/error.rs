//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::services::PositionError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `UNKNOWN_TARGET`
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a hint for the caller.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed body or wrong field types
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Request rejected or failed by the position service
    Position(PositionError),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg.clone()))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg.clone()),
            ),
            AppError::Position(e) => {
                let msg = e.to_string();
                match e {
                    PositionError::InvalidTime(_) => {
                        (StatusCode::BAD_REQUEST, ApiError::new("INVALID_TIME", msg))
                    }
                    PositionError::UnknownTarget(_) => {
                        (StatusCode::BAD_REQUEST, ApiError::new("UNKNOWN_TARGET", msg))
                    }
                    PositionError::InvalidLocation(_) => {
                        (StatusCode::BAD_REQUEST, ApiError::new("INVALID_LOCATION", msg))
                    }
                    PositionError::NoRadius(_) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ApiError::new("NO_RADIUS", msg)
                            .with_details("use \"timespan\": \"day\" for an alt/az series"),
                    ),
                    PositionError::Ephemeris(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("INTERNAL_ERROR", msg),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            error!(code = body.code, "{}", body.message);
        } else {
            warn!(code = body.code, status = status.as_u16(), "{}", body.message);
        }

        (status, Json(body)).into_response()
    }
}

impl From<PositionError> for AppError {
    fn from(err: PositionError) -> Self {
        AppError::Position(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TargetBody, TimeParseError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            (
                AppError::Position(PositionError::InvalidTime(TimeParseError::Empty)),
                StatusCode::BAD_REQUEST,
                "INVALID_TIME",
            ),
            (
                AppError::Position(PositionError::NoRadius(TargetBody::Earth)),
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_RADIUS",
            ),
        ];

        for (err, status, code) in cases {
            let (s, body) = err.status_and_body();
            assert_eq!(s, status);
            assert_eq!(body.code, code);
        }
    }
}
