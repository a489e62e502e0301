//! HTTP handlers for the task pipeline API.
//!
//! Each mutating endpoint publishes a domain event. Publishing is
//! best-effort from the request's point of view: a failed publish is
//! logged and the request still completes.

use crate::state::AppState;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Build the API routes for this service.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api-svc-a/health", get(health_handler))
        .route("/api-svc-a/process", post(process_handler))
        .route("/api-svc-a/complete", post(complete_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.service_name,
        "version": state.app.version,
    }))
}

/// Accept a task request and publish a `task.created` event.
async fn process_handler(State(state): State<AppState>, body: String) -> Json<Value> {
    info!("Processing request...");

    let event_data = json!({
        "taskId": format!("task-{}", Uuid::new_v4()),
        "service": state.service_name,
        "timestamp": Utc::now().to_rfc3339(),
        "requestData": parse_request_body(&body),
    });

    if let Err(e) = state.publisher.publish("task.created", event_data).await {
        error!(error = %e, "Failed to publish event");
    }

    Json(json!({
        "message": "Task processed successfully",
        "service": state.service_name,
    }))
}

/// Mark a process as completed and publish a `process.completed` event.
async fn complete_handler(State(state): State<AppState>, body: String) -> Json<Value> {
    info!("Completing process...");

    let event_data = json!({
        "processId": format!("proc-{}", Uuid::new_v4()),
        "service": state.service_name,
        "status": "completed",
        "timestamp": Utc::now().to_rfc3339(),
        "requestData": parse_request_body(&body),
    });

    if let Err(e) = state.publisher.publish("process.completed", event_data).await {
        error!(error = %e, "Failed to publish event");
    }

    Json(json!({
        "message": "Process completed successfully",
        "service": state.service_name,
    }))
}

/// Parse the request body leniently.
///
/// An empty or malformed body becomes `null` request data rather than a
/// rejected request.
fn parse_request_body(body: &str) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to parse request body, continuing without it");
        Value::Null
    })
}
