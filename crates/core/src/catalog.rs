//! Accepted-set catalog types.
//!
//! The accepted set is the externally maintained catalog this service
//! searches over, fetched as JSON from the trust root and held in memory.
//! Every field is optional and every value is coerced leniently at the
//! parse boundary, so a sparse or sloppy upstream document is never an
//! error — at worst it degrades to the fallback set with a diagnostic
//! note.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Diagnostic note when the upstream body is not an object with an
/// array-valued `items` field.
pub const INVALID_SHAPE_NOTE: &str = "upstream_invalid_shape";

/// One searchable catalog entry.
///
/// Wire names are camelCase. Non-string values in string positions are
/// dropped rather than rejected; a missing or malformed field reads as
/// absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub repo: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub well_known: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub languages: Vec<String>,
}

/// The cached upstream document.
///
/// `items` keeps upstream order; the remaining fields are opaque
/// passthrough metadata.
#[derive(Debug, Clone, Default)]
pub struct AcceptedSet {
    pub items: Vec<CatalogItem>,
    pub schema: Option<String>,
    pub version: Option<String>,
    pub updated_at: Option<String>,
    pub lane: Option<String>,
    pub note: Option<String>,
}

impl AcceptedSet {
    /// The empty-but-valid set used whenever a real one is unavailable.
    pub fn fallback(note: impl Into<String>) -> Self {
        Self { note: Some(note.into()), ..Self::default() }
    }

    /// Interpret an upstream JSON body.
    ///
    /// The only shape requirement is an object with an array-valued
    /// `items` field; anything else degrades to [`AcceptedSet::fallback`]
    /// with [`INVALID_SHAPE_NOTE`]. Array entries that are not objects
    /// become empty items so one junk entry cannot sink the document.
    pub fn from_upstream(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::fallback(INVALID_SHAPE_NOTE);
        };
        let Some(Value::Array(raw_items)) = fields.remove("items") else {
            return Self::fallback(INVALID_SHAPE_NOTE);
        };

        let items = raw_items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect();

        Self {
            items,
            schema: take_string(&mut fields, "schema"),
            version: take_string(&mut fields, "version"),
            updated_at: take_string(&mut fields, "updatedAt"),
            lane: take_string(&mut fields, "lane"),
            note: take_string(&mut fields, "note"),
        }
    }
}

fn take_string(fields: &mut serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Keep string values, drop everything else.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Keep string elements of an array, drop everything else.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
