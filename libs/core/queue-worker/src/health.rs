//! Health check handlers for queue workers.
//!
//! Liveness only: the endpoint reports OK while the process is up,
//! independent of the consumption loop's state.

use axum::{extract::State, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

/// Health response for liveness probes.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Liveness probe handler.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: app.name,
        version: app.version,
    })
}

/// Create a router with standard liveness endpoints:
/// - `/health`
/// - `/healthz` (K8s style)
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(health_handler))
        .with_state(app_info)
}
