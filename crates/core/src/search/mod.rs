//! Substring search over the accepted set.
//!
//! The executor is a linear scan: every item's haystack is tested for the
//! normalized query as a contiguous substring. Matches keep upstream
//! order (first-come order is the tie-break; there is no relevance
//! ranking) and are truncated to the effective limit.

pub mod normalize;

pub use normalize::{haystack, normalize, normalize_opt};

use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use crate::catalog::{AcceptedSet, CatalogItem};

/// Smallest accepted `limit` value.
pub const MIN_LIMIT: usize = 1;

/// Largest accepted `limit` value.
pub const MAX_LIMIT: usize = 50;

/// Limit used when the caller sends none, or sends something non-numeric.
pub const DEFAULT_LIMIT: usize = 10;

/// Title used when an item carries none.
const UNTITLED: &str = "(untitled)";

/// Resolve the caller-supplied `limit` parameter.
///
/// Numeric values are clamped to `[MIN_LIMIT, MAX_LIMIT]`; absent or
/// non-numeric values fall back to [`DEFAULT_LIMIT`] rather than being
/// rejected.
pub fn effective_limit(raw: Option<&str>) -> usize {
    match raw.map(str::trim).and_then(|value| value.parse::<i64>().ok()) {
        Some(value) => value.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize,
        None => DEFAULT_LIMIT,
    }
}

/// One shaped search result.
///
/// Every field is always present so the response shape is uniform across
/// results; absent upstream values surface as defaults, not omissions.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub description: String,
    pub kind: Option<String>,
    pub repo: Option<String>,
    pub well_known: Option<String>,
    pub timestamp: Option<String>,
    pub topics: Vec<String>,
    pub languages: Vec<String>,
}

impl SearchHit {
    fn from_item(item: &CatalogItem) -> Self {
        Self {
            title: item.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            url: item.url.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
            kind: item.kind.clone(),
            repo: item.repo.clone(),
            well_known: item.well_known.clone(),
            timestamp: item.timestamp.clone(),
            topics: item.topics.clone(),
            languages: item.languages.clone(),
        }
    }
}

/// The search response envelope.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    pub ok: bool,
    /// The query as the caller sent it.
    pub query: String,
    /// URL the accepted set is fetched from.
    pub source: String,
    /// Item count of the whole cached set.
    pub total: usize,
    /// Number of results returned (after truncation).
    pub hits: usize,
    /// Effective limit used.
    pub limit: usize,
    pub results: Vec<SearchHit>,
    /// When the cached set was fetched (RFC 3339).
    pub fetched_at: String,
    /// Upstream document timestamp, passed through when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Diagnostic note from the cache layer, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Run a search over one accepted-set snapshot.
///
/// A trimmed-empty query returns no results but still reports the totals
/// and cache metadata callers use to introspect cache state. When the
/// catalog is empty and the cache layer left no note of its own,
/// `empty_catalog_note` is surfaced instead.
pub fn execute(
    set: &AcceptedSet, query: &str, limit: usize, source: &str, fetched_at: DateTime<Utc>, empty_catalog_note: &str,
) -> SearchEnvelope {
    let needle = normalize(query);
    let total = set.items.len();

    let results: Vec<SearchHit> = if needle.is_empty() {
        Vec::new()
    } else {
        set.items
            .iter()
            .filter(|item| haystack(item).contains(&needle))
            .take(limit)
            .map(SearchHit::from_item)
            .collect()
    };

    let note = set
        .note
        .clone()
        .or_else(|| (total == 0).then(|| empty_catalog_note.to_string()));

    tracing::debug!(total, hits = results.len(), limit, "search executed");

    SearchEnvelope {
        ok: true,
        query: query.to_string(),
        source: source.to_string(),
        total,
        hits: results.len(),
        limit,
        results,
        fetched_at: fetched_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        updated_at: set.updated_at.clone(),
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str, topics: &[&str]) -> CatalogItem {
        CatalogItem {
            title: Some(title.into()),
            description: Some(description.into()),
            topics: topics.iter().map(|t| (*t).to_string()).collect(),
            ..Default::default()
        }
    }

    fn set_of(items: Vec<CatalogItem>) -> AcceptedSet {
        AcceptedSet { items, ..Default::default() }
    }

    fn run(set: &AcceptedSet, query: &str, limit: usize) -> SearchEnvelope {
        execute(set, query, limit, "https://trust.example.org/catalog.json", Utc::now(), "Search index not enabled.")
    }

    #[test]
    fn test_effective_limit_default_and_clamp() {
        assert_eq!(effective_limit(None), 10);
        assert_eq!(effective_limit(Some("abc")), 10);
        assert_eq!(effective_limit(Some("")), 10);
        assert_eq!(effective_limit(Some("7.5")), 10);
        assert_eq!(effective_limit(Some("5")), 5);
        assert_eq!(effective_limit(Some(" 5 ")), 5);
        assert_eq!(effective_limit(Some("0")), 1);
        assert_eq!(effective_limit(Some("-3")), 1);
        assert_eq!(effective_limit(Some("999")), 50);
    }

    #[test]
    fn test_single_item_scenario() {
        let set = set_of(vec![item("Feedrunner Crawler", "indexes feeds", &["search"])]);

        let found = run(&set, "FEEDS", 5);
        assert_eq!(found.hits, 1);
        assert_eq!(found.total, 1);
        assert_eq!(found.limit, 5);
        assert_eq!(found.results[0].title, "Feedrunner Crawler");

        let missed = run(&set, "nomatch", 5);
        assert_eq!(missed.hits, 0);
        assert!(missed.results.is_empty());
        assert_eq!(missed.total, 1);
    }

    #[test]
    fn test_empty_query_reports_metadata_only() {
        let set = AcceptedSet {
            items: vec![item("A", "a", &[]), item("B", "b", &[])],
            updated_at: Some("2026-05-01T12:00:00Z".into()),
            ..Default::default()
        };

        for query in ["", "   ", "\t\n"] {
            let envelope = run(&set, query, 10);
            assert_eq!(envelope.hits, 0);
            assert!(envelope.results.is_empty());
            assert_eq!(envelope.total, 2);
            assert_eq!(envelope.updated_at.as_deref(), Some("2026-05-01T12:00:00Z"));
        }
    }

    #[test]
    fn test_results_keep_upstream_order() {
        let set = set_of(vec![
            item("first match", "x", &[]),
            item("no", "y", &[]),
            item("second match", "z", &[]),
            item("third match", "w", &[]),
        ]);

        let envelope = run(&set, "match", 10);
        let titles: Vec<&str> = envelope.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["first match", "second match", "third match"]);
    }

    #[test]
    fn test_truncation_to_limit() {
        let items: Vec<CatalogItem> = (0..20).map(|i| item(&format!("entry {i}"), "match me", &[])).collect();
        let set = set_of(items);

        let envelope = run(&set, "match me", 3);
        assert_eq!(envelope.hits, 3);
        assert_eq!(envelope.total, 20);
        assert_eq!(envelope.results[0].title, "entry 0");
        assert_eq!(envelope.results[2].title, "entry 2");
    }

    #[test]
    fn test_matching_is_case_and_whitespace_insensitive() {
        let set = set_of(vec![item("Wide   Gauge Scanner", "", &[])]);

        assert_eq!(run(&set, "wide gauge", 10).hits, 1);
        assert_eq!(run(&set, "  WIDE   GAUGE  ", 10).hits, 1);
    }

    #[test]
    fn test_query_does_not_match_across_fields() {
        let set = set_of(vec![item("alpha", "beta", &[])]);
        assert_eq!(run(&set, "alpha beta", 10).hits, 0);
        assert_eq!(run(&set, "alpha", 10).hits, 1);
    }

    #[test]
    fn test_hit_shape_defaults() {
        let set = set_of(vec![CatalogItem { description: Some("only description".into()), ..Default::default() }]);

        let envelope = run(&set, "only description", 10);
        let hit = &envelope.results[0];
        assert_eq!(hit.title, "(untitled)");
        assert_eq!(hit.url, "");
        assert_eq!(hit.description, "only description");
        assert!(hit.kind.is_none());
        assert!(hit.repo.is_none());
        assert!(hit.well_known.is_none());
        assert!(hit.timestamp.is_none());
        assert!(hit.topics.is_empty());
        assert!(hit.languages.is_empty());
    }

    #[test]
    fn test_fallback_note_passes_through() {
        let set = AcceptedSet::fallback("upstream_fetch_failed:500");
        let envelope = run(&set, "anything", 10);
        assert_eq!(envelope.total, 0);
        assert_eq!(envelope.hits, 0);
        assert_eq!(envelope.note.as_deref(), Some("upstream_fetch_failed:500"));
    }

    #[test]
    fn test_empty_catalog_surfaces_not_ready_note() {
        let envelope = run(&set_of(Vec::new()), "", 10);
        assert_eq!(envelope.note.as_deref(), Some("Search index not enabled."));
    }

    #[test]
    fn test_populated_catalog_has_no_note() {
        let envelope = run(&set_of(vec![item("A", "a", &[])]), "a", 10);
        assert!(envelope.note.is_none());
    }
}
