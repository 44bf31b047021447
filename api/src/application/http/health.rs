use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use tastelogic_core::domain::health::ports::HealthService;

use crate::application::http::server::app_state::AppState;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(&format!("{}/health", root_path), get(health))
        .route(&format!("{}/health/ready", root_path), get(readiness))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness includes a database round trip.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.service.readiness().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}
