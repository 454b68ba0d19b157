//! Query and field normalization.
//!
//! Matching is case- and whitespace-insensitive: the same canonical form
//! is applied to the query and to every searchable field before the
//! substring test, and it is idempotent.

use crate::catalog::CatalogItem;

/// Separator between haystack segments. Keeps a query from spuriously
/// matching across a field boundary.
const FIELD_SEPARATOR: &str = " | ";

/// Canonical comparison form: lower-cased, runs of whitespace collapsed
/// to a single space, leading/trailing whitespace trimmed.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Normalize an optional field; absent normalizes to the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Build the one normalized string an item is matched against.
///
/// Field order is fixed (title, description, url, repo, wellKnown,
/// topics, languages, kind, notes) so identical input yields identical
/// haystacks across runs.
pub fn haystack(item: &CatalogItem) -> String {
    let mut segments: Vec<String> = vec![
        normalize_opt(item.title.as_deref()),
        normalize_opt(item.description.as_deref()),
        normalize_opt(item.url.as_deref()),
        normalize_opt(item.repo.as_deref()),
        normalize_opt(item.well_known.as_deref()),
    ];
    segments.extend(item.topics.iter().map(|topic| normalize(topic)));
    segments.extend(item.languages.iter().map(|language| normalize(language)));
    segments.push(normalize_opt(item.kind.as_deref()));
    segments.push(normalize_opt(item.notes.as_deref()));
    segments.join(FIELD_SEPARATOR)
}
