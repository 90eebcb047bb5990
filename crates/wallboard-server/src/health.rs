use axum::Json;
use serde::Serialize;

use wallboard_core::time::timestamp_now;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /health. Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: timestamp_now(),
    })
}

/// GET /. Plain text greeting.
pub async fn greeting() -> &'static str {
    "Hello Agent Wallboard!"
}
