use axum::extract::{Path, State};
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use wallboard_core::agent::{Agent, AgentStatus};
use wallboard_core::time::timestamp_now;

use crate::error::AppError;
use crate::registry::{DashboardStats, StatusChange};
use crate::state::AppState;

/// Response listing the full roster.
#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub success: bool,
    pub data: Vec<Agent>,
    pub count: usize,
    pub timestamp: String,
}

/// GET /api/agents. Returns all agents in registration order.
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentListResponse> {
    let registry = state.registry.read().await;
    let data = registry.list().to_vec();
    Json(AgentListResponse {
        success: true,
        count: data.len(),
        data,
        timestamp: timestamp_now(),
    })
}

#[derive(Debug, Serialize)]
pub struct AgentCountResponse {
    pub success: bool,
    pub count: usize,
    pub timestamp: String,
}

/// GET /api/agents/count. Returns the number of registered agents.
pub async fn agent_count(State(state): State<AppState>) -> Json<AgentCountResponse> {
    let registry = state.registry.read().await;
    Json(AgentCountResponse {
        success: true,
        count: registry.count(),
        timestamp: timestamp_now(),
    })
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub success: bool,
    pub data: Agent,
    pub timestamp: String,
}

/// GET /api/agents/{code}. Exact, case-sensitive lookup.
pub async fn get_agent(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AgentResponse>, AppError> {
    let registry = state.registry.read().await;
    let agent = registry
        .get(&code)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;
    Ok(Json(AgentResponse {
        success: true,
        data: agent,
        timestamp: timestamp_now(),
    }))
}

/// Request body for a status change. The whole body is optional on the
/// wire; a missing body is treated as a missing status.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusBody {
    #[serde(default)]
    pub status: Option<String>,
}

/// Response for a successful status change.
#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub data: StatusChange,
    pub timestamp: String,
}

/// PATCH /api/agents/{code}/status. Validates the requested status and
/// applies it.
///
/// The requested status is matched case-insensitively after whitespace
/// normalization; the stored value is always the canonical casing. Status
/// validation runs before the code lookup, so a bad status on an unknown
/// code is a 400.
pub async fn update_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Option<Json<UpdateStatusBody>>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let Json(body) = body.unwrap_or_default();
    let requested = body.status.as_deref().unwrap_or("");
    if requested.trim().is_empty() {
        return Err(AppError::InvalidStatus("Missing status".to_string()));
    }
    let status: AgentStatus = requested
        .parse()
        .map_err(|_| AppError::InvalidStatus(format!("Invalid status: {}", requested.trim())))?;

    let mut registry = state.registry.write().await;
    let change = registry
        .update_status(&code, status)
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: "Status updated".to_string(),
        data: change,
        timestamp: timestamp_now(),
    }))
}

/// Request body for login. The whole body is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response carrying the affected agent for login/logout.
#[derive(Debug, Serialize)]
pub struct AgentActionResponse {
    pub success: bool,
    pub message: String,
    pub data: Agent,
    pub timestamp: String,
}

/// POST /api/agents/{code}/login. Upsert: unknown codes are registered.
pub async fn login(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Option<Json<LoginBody>>,
) -> Json<AgentActionResponse> {
    let Json(body) = body.unwrap_or_default();
    let mut registry = state.registry.write().await;
    let agent = registry.login(&code, body.name.as_deref(), Utc::now());
    Json(AgentActionResponse {
        success: true,
        message: "Agent logged in".to_string(),
        data: agent,
        timestamp: timestamp_now(),
    })
}

/// POST /api/agents/{code}/logout. Forces Offline and ends the session.
pub async fn logout(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AgentActionResponse>, AppError> {
    let mut registry = state.registry.write().await;
    let agent = registry
        .logout(&code)
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;
    Ok(Json(AgentActionResponse {
        success: true,
        message: "Agent logged out".to_string(),
        data: agent,
        timestamp: timestamp_now(),
    }))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub data: DashboardStats,
    pub timestamp: String,
}

/// GET /api/dashboard/stats. Status breakdown with percentages.
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardResponse> {
    let registry = state.registry.read().await;
    Json(DashboardResponse {
        success: true,
        data: registry.dashboard_stats(),
        timestamp: timestamp_now(),
    })
}
