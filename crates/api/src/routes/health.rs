//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — liveness only; always `UP`, even when the meal store cannot serve requests.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}
