//! Search endpoint.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use waypost_core::search::{self, SearchEnvelope};

use crate::AppState;

/// Query parameters for `GET /search/v1`.
///
/// `limit` arrives as a raw string so a non-numeric value degrades to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// `GET /search/v1` — substring search over the accepted set.
///
/// An empty query returns a metadata-only envelope so callers can
/// introspect cache state without running a search.
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchEnvelope> {
    let snapshot = state.accepted.current().await;
    let limit = search::effective_limit(params.limit.as_deref());

    let envelope = search::execute(
        &snapshot.set,
        params.q.as_deref().unwrap_or(""),
        limit,
        &state.config.accepted_set_source_url(),
        snapshot.fetched_at,
        &state.config.search_not_ready_message,
    );

    Json(envelope)
}
