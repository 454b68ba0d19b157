//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//!
//! 1. Environment variables (WAYPOST_*)
//! 2. TOML config file (if WAYPOST_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Well-known path of the accepted-set catalog under the trust root.
const ACCEPTED_SET_PATH: &str = "/.well-known/accepted-set.json";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WAYPOST_*)
/// 2. TOML config file (if WAYPOST_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the trust root origin.
    ///
    /// Set via WAYPOST_TRUST_ROOT_BASE environment variable. Required;
    /// there is no usable default.
    #[serde(default)]
    pub trust_root_base: String,

    /// Override for the accepted-set document URL.
    ///
    /// Set via WAYPOST_ACCEPTED_SET_URL environment variable. When unset,
    /// the document is read from `/.well-known/accepted-set.json` under
    /// the trust root.
    #[serde(default)]
    pub accepted_set_url: Option<String>,

    /// Value of the access-control-allow-origin response header.
    ///
    /// Set via WAYPOST_CORS_ALLOW_ORIGIN environment variable.
    #[serde(default = "default_cors_allow_origin")]
    pub cors_allow_origin: String,

    /// Note surfaced by the search envelope while the catalog is empty.
    ///
    /// Set via WAYPOST_SEARCH_NOT_READY_MESSAGE environment variable.
    #[serde(default = "default_search_not_ready_message")]
    pub search_not_ready_message: String,

    /// Port to listen on. Set via WAYPOST_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// User-Agent string for upstream requests.
    ///
    /// Set via WAYPOST_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via WAYPOST_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Freshness window for the cached accepted set, in seconds.
    ///
    /// Set via WAYPOST_ACCEPTED_SET_TTL_SECS environment variable.
    #[serde(default = "default_accepted_set_ttl_secs")]
    pub accepted_set_ttl_secs: u64,
}

fn default_cors_allow_origin() -> String {
    "*".into()
}

fn default_search_not_ready_message() -> String {
    "Search index not enabled.".into()
}

fn default_port() -> u16 {
    8080
}

fn default_user_agent() -> String {
    "waypost/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_accepted_set_ttl_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trust_root_base: String::new(),
            accepted_set_url: None,
            cors_allow_origin: default_cors_allow_origin(),
            search_not_ready_message: default_search_not_ready_message(),
            port: default_port(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            accepted_set_ttl_secs: default_accepted_set_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Upstream timeout as a Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Accepted-set freshness window as a Duration.
    pub fn accepted_set_ttl(&self) -> Duration {
        Duration::from_secs(self.accepted_set_ttl_secs)
    }

    /// Effective URL of the accepted-set document.
    ///
    /// The explicit override wins; otherwise the document lives under the
    /// trust root alongside the other well-known artifacts.
    pub fn accepted_set_source_url(&self) -> String {
        match &self.accepted_set_url {
            Some(url) => url.clone(),
            None => format!("{}{}", self.trust_root_base.trim_end_matches('/'), ACCEPTED_SET_PATH),
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WAYPOST_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WAYPOST_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.trust_root_base.is_empty());
        assert!(config.accepted_set_url.is_none());
        assert_eq!(config.cors_allow_origin, "*");
        assert_eq!(config.search_not_ready_message, "Search index not enabled.");
        assert_eq!(config.port, 8080);
        assert_eq!(config.user_agent, "waypost/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.accepted_set_ttl_secs, 60);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.accepted_set_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_accepted_set_source_url_defaults_under_trust_root() {
        let config = AppConfig { trust_root_base: "https://trust.example.org".into(), ..Default::default() };
        assert_eq!(
            config.accepted_set_source_url(),
            "https://trust.example.org/.well-known/accepted-set.json"
        );
    }

    #[test]
    fn test_accepted_set_source_url_trims_trailing_slash() {
        let config = AppConfig { trust_root_base: "https://trust.example.org/".into(), ..Default::default() };
        assert_eq!(
            config.accepted_set_source_url(),
            "https://trust.example.org/.well-known/accepted-set.json"
        );
    }

    #[test]
    fn test_accepted_set_source_url_override_wins() {
        let config = AppConfig {
            trust_root_base: "https://trust.example.org".into(),
            accepted_set_url: Some("https://mirror.example.net/catalog.json".into()),
            ..Default::default()
        };
        assert_eq!(config.accepted_set_source_url(), "https://mirror.example.net/catalog.json");
    }
}
