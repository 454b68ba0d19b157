//! HTTP-facing error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use waypost_core::Error;

/// Failure to reach the trust root at all.
///
/// Everything else on the proxy path is a pass-through of the origin's
/// own status; this envelope only appears when there is no origin
/// response to forward.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ProxyFailure(#[from] Error);

impl IntoResponse for ProxyFailure {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self.0, "trust proxy upstream unreachable");
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "ok": false,
                "error": "upstream_unreachable",
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
