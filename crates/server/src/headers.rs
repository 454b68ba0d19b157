//! Uniform response headers.
//!
//! Every response leaves with the same caching, sniffing, and CORS
//! headers, including error responses. The browser contract is
//! GET+OPTIONS only, so preflight is answered before routing.

use axum::extract::{Request, State};
use axum::http::header::{self, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::AppState;

const ALLOW_METHODS: &str = "GET, OPTIONS";
const ALLOW_HEADERS: &str = "content-type";

/// Short-circuit any OPTIONS request (CORS preflight included) with an
/// empty 204 before routing.
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

/// Stamp the uniform header set onto an outgoing response.
pub async fn stamp(State(state): State<AppState>, mut response: Response) -> Response {
    let origin = HeaderValue::from_str(&state.config.cors_allow_origin)
        .unwrap_or_else(|_| HeaderValue::from_static("*"));

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    response
}
