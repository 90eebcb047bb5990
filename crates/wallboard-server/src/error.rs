use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use wallboard_core::agent::AgentStatus;
use wallboard_core::time::timestamp_now;

#[derive(Debug)]
pub enum AppError {
    /// Malformed or unknown status value. The response body carries the
    /// full set of acceptable statuses under `allow`.
    InvalidStatus(String),
    NotFound(String),
    #[allow(dead_code)]
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(m) | Self::NotFound(m) | Self::Internal(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::InvalidStatus(m) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "success": false,
                    "message": m,
                    "allow": AgentStatus::ALL.map(|s| s.as_str()),
                    "timestamp": timestamp_now(),
                }),
            ),
            Self::NotFound(m) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "success": false,
                    "message": m,
                    "timestamp": timestamp_now(),
                }),
            ),
            Self::Internal(m) => {
                // Log the cause, never leak it to the client.
                tracing::error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "success": false,
                        "message": "Internal Server Error",
                        "timestamp": timestamp_now(),
                    }),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}
