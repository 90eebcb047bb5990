pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod registry;
pub mod state;

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/agents", get(api::list_agents))
        .route("/agents/count", get(api::agent_count))
        .route("/agents/{code}", get(api::get_agent))
        .route("/agents/{code}/status", patch(api::update_status))
        .route("/agents/{code}/login", post(api::login))
        .route("/agents/{code}/logout", post(api::logout))
        .route("/dashboard/stats", get(api::dashboard_stats));

    // Wallboard clients are browser dashboards served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(health::greeting))
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}
