//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `trust_root_base` is unset, and
    /// `ConfigError::Invalid` if:
    /// - `trust_root_base` or `accepted_set_url` is not an http(s) URL
    /// - `timeout_ms` is outside 100..=300_000
    /// - `accepted_set_ttl_secs` is outside 1..=3600
    /// - `user_agent` or `cors_allow_origin` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trust_root_base.is_empty() {
            return Err(ConfigError::Missing {
                field: "trust_root_base".into(),
                hint: "Set WAYPOST_TRUST_ROOT_BASE environment variable".into(),
            });
        }
        validate_http_url("trust_root_base", &self.trust_root_base)?;

        if let Some(url) = &self.accepted_set_url {
            validate_http_url("accepted_set_url", url)?;
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.accepted_set_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "accepted_set_ttl_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.accepted_set_ttl_secs > 3600 {
            return Err(ConfigError::Invalid {
                field: "accepted_set_ttl_secs".into(),
                reason: "must not exceed 1 hour (3600s)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cors_allow_origin.is_empty() {
            return Err(ConfigError::Invalid {
                field: "cors_allow_origin".into(),
                reason: "must not be empty; use \"*\" to allow any origin".into(),
            });
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("not a valid URL: {e}") })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            field: field.into(),
            reason: format!("unsupported scheme \"{}\"; expected http or https", url.scheme()),
        });
    }

    Ok(())
}
