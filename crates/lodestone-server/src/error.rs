//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lodestone_core::errors::{FusionError, LodestoneError};
use serde::Serialize;

/// An error leaving the HTTP boundary as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub LodestoneError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LodestoneError::InvalidInput(_)
            | LodestoneError::Fusion(FusionError::InvalidStrategy { .. }) => StatusCode::BAD_REQUEST,
            LodestoneError::NoUsableResult { .. } | LodestoneError::Upstream(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            LodestoneError::Fusion(_)
            | LodestoneError::ConfigError(_)
            | LodestoneError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<LodestoneError> for ApiError {
    fn from(e: LodestoneError) -> Self {
        Self(e)
    }
}
