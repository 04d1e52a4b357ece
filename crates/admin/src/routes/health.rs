//! Health check endpoints.

use axum::Json;
use serde_json::{Value, json};

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Readiness check.
///
/// The service is ready as soon as it is serving; the backing API is
/// probed per-request, not here.
pub async fn ready() -> Json<Value> {
    Json(json!({"status": "ready"}))
}
