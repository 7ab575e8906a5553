//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meal::ValidationError;
use meal_store::PersistenceError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("{}", .0.body_text())]
    Decoding(#[from] JsonRejection),

    /// The decoded meal violates a meal constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The meal store failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decoding(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Decoding(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Persistence(
                PersistenceError::PoolExhausted | PersistenceError::Unreachable(_),
            ) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if let ApiError::Persistence(ref err) = self {
            metrics::counter!("meal_store_errors_total").increment(1);
            tracing::error!(error = %err, "meal store failure");
        } else {
            tracing::debug!(error = %message, "rejected request");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
