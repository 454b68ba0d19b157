//! Request routing.
//!
//! The routing table maps (method, path) to a handler. Every path serves
//! GET only; OPTIONS is short-circuited by the preflight middleware, a
//! disallowed method answers 405, and an unknown path answers 404 — both
//! with machine-readable JSON bodies.

pub mod health;
pub mod openapi;
pub mod search;
pub mod trust;

use std::time::Duration;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::headers;

/// Hint returned alongside info and not-found responses.
pub(crate) const ENDPOINT_HINT: &str = "Try /health or /openapi.json";

/// Whole-request deadline; upstream calls carry their own tighter timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::info).fallback(method_not_allowed))
        .route("/health", get(health::check).fallback(method_not_allowed))
        .route("/openapi.json", get(openapi::document).fallback(method_not_allowed))
        .route("/search/v1", get(search::search).fallback(method_not_allowed))
        .route("/trust/v1/deploy", get(trust::deploy).fallback(method_not_allowed))
        .route("/trust/v1/sha256", get(trust::sha256).fallback(method_not_allowed))
        .fallback(unmatched)
        .layer(middleware::from_fn(headers::preflight))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(middleware::map_response_with_state(state.clone(), headers::stamp))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any method other than GET (OPTIONS never reaches the router).
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "ok": false, "error": "method_not_allowed", "allowed": ["GET", "OPTIONS"] })),
    )
        .into_response()
}

/// No route matched. The method check comes first so a POST to an
/// unknown path reads as a method problem, not a missing endpoint.
async fn unmatched(method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return method_not_allowed().await;
    }

    (
        StatusCode::NOT_FOUND,
        Json(json!({ "ok": false, "error": "not_found", "path": uri.path(), "hint": ENDPOINT_HINT })),
    )
        .into_response()
}
