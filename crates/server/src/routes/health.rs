//! Service info and health endpoints.

use axum::Json;
use serde_json::{Value, json};

use super::ENDPOINT_HINT;
use crate::SERVICE_NAME;

/// `GET /` — service identity and a pointer to the discoverable endpoints.
pub async fn info() -> Json<Value> {
    Json(json!({ "ok": true, "service": SERVICE_NAME, "hint": ENDPOINT_HINT }))
}

/// `GET /health` — liveness check.
pub async fn check() -> Json<Value> {
    Json(json!({ "ok": true, "status": "ok" }))
}
