//! Trust artifact proxy endpoints.
//!
//! Pass-through for the two fixed `.well-known` artifacts published at
//! the trust root. The origin's status travels verbatim; caching and
//! sniffing headers are normalized on the way out by the header
//! middleware.

use axum::extract::State;
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use waypost_client::TrustArtifact;

use crate::AppState;
use crate::error::ProxyFailure;

/// `GET /trust/v1/deploy` — proxies `/.well-known/deploy.txt`.
pub async fn deploy(State(state): State<AppState>) -> Result<Response, ProxyFailure> {
    proxy(&state, TrustArtifact::Deploy).await
}

/// `GET /trust/v1/sha256` — proxies `/.well-known/sha256.json`.
pub async fn sha256(State(state): State<AppState>) -> Result<Response, ProxyFailure> {
    proxy(&state, TrustArtifact::Sha256).await
}

async fn proxy(state: &AppState, artifact: TrustArtifact) -> Result<Response, ProxyFailure> {
    let payload = state.trust.fetch(artifact).await?;

    let status = StatusCode::from_u16(payload.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = HeaderValue::from_str(&payload.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let mut response = (status, payload.body).into_response();
    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    Ok(response)
}
