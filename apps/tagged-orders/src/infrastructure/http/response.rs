//! HTTP response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::errors::OrdersError;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Error body. Never carries order data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl OrdersError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure { .. } => StatusCode::BAD_GATEWAY,
            Self::SymbolResolutionFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to callers.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Unauthorized".to_string(),
            Self::BadRequest { message } => message.clone(),
            Self::UpstreamFailure { .. } => "Upstream service unavailable".to_string(),
            Self::SymbolResolutionFailure { .. } => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for OrdersError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            code: self.code().to_string(),
            message: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
