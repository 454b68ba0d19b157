//! OpenAPI document for the HTTP surface.
//!
//! Built from a static description of the routing table; the search
//! result schemas are generated from the envelope types so the document
//! cannot drift from the wire format.

use axum::Json;
use schemars::schema_for;
use serde_json::{Value, json};
use waypost_core::search::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, SearchEnvelope, SearchHit};

use crate::SERVICE_NAME;

/// `GET /openapi.json` — OpenAPI 3.0.3 description of this service.
pub async fn document() -> Json<Value> {
    Json(build())
}

fn build() -> Value {
    let envelope_schema = serde_json::to_value(schema_for!(SearchEnvelope)).unwrap_or_default();
    let hit_schema = serde_json::to_value(schema_for!(SearchHit)).unwrap_or_default();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Edge front end: accepted-set search and trust artifact proxy.",
        },
        "paths": {
            "/": {
                "get": { "summary": "Service info", "responses": { "200": { "description": "OK" } } },
            },
            "/health": {
                "get": { "summary": "Healthcheck", "responses": { "200": { "description": "OK" } } },
            },
            "/openapi.json": {
                "get": { "summary": "This document", "responses": { "200": { "description": "JSON spec" } } },
            },
            "/search/v1": {
                "get": {
                    "summary": "Substring search over the accepted set",
                    "description": "Case- and whitespace-insensitive containment search. \
                                    An empty query returns a metadata-only envelope.",
                    "parameters": [
                        {
                            "name": "q",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string" },
                        },
                        {
                            "name": "limit",
                            "in": "query",
                            "required": false,
                            "schema": {
                                "type": "integer",
                                "minimum": MIN_LIMIT,
                                "maximum": MAX_LIMIT,
                                "default": DEFAULT_LIMIT,
                            },
                        },
                    ],
                    "responses": {
                        "200": {
                            "description": "Search envelope",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SearchEnvelope" },
                                },
                            },
                        },
                    },
                },
            },
            "/trust/v1/deploy": {
                "get": { "summary": "Proxy deploy.txt", "responses": { "200": { "description": "deploy.txt" } } },
            },
            "/trust/v1/sha256": {
                "get": { "summary": "Proxy sha256.json", "responses": { "200": { "description": "sha256.json" } } },
            },
        },
        "components": {
            "schemas": {
                "SearchEnvelope": envelope_schema,
                "SearchHit": hit_schema,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_path() {
        let doc = build();
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/", "/health", "/openapi.json", "/search/v1", "/trust/v1/deploy", "/trust/v1/sha256"] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn test_document_embeds_envelope_schema() {
        let doc = build();
        assert_eq!(doc["openapi"], "3.0.3");
        assert!(doc["components"]["schemas"]["SearchEnvelope"].is_object());
        assert!(doc["components"]["schemas"]["SearchHit"].is_object());
    }
}
