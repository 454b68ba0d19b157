//! Accepted-set source with a freshness-window cache.
//!
//! One instance per process owns the cached catalog. Within the freshness
//! window every caller gets the cached snapshot without touching the
//! network; after expiry the next caller refreshes. A completed fetch
//! attempt of any outcome (including a hard failure) holds for a full
//! window. Callers racing an expired window may each refresh — the cached
//! value is replaced wholesale, so the worst case is a redundant fetch,
//! never a torn set.

use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use waypost_core::Error;
use waypost_core::catalog::{AcceptedSet, INVALID_SHAPE_NOTE};

/// Diagnostic note when the upstream cannot be reached at all.
pub const UNREACHABLE_NOTE: &str = "upstream_unreachable";

/// Configuration for the accepted-set source.
#[derive(Debug, Clone)]
pub struct AcceptedSetConfig {
    /// URL of the accepted-set JSON document.
    pub source_url: String,

    /// Freshness window. A completed fetch attempt (success or failure)
    /// is served from memory for this long.
    pub ttl: Duration,

    /// Per-request timeout.
    pub timeout: Duration,

    /// User-Agent string for upstream requests.
    pub user_agent: String,
}

/// The cached set handed to callers, plus when it was fetched.
#[derive(Debug, Clone)]
pub struct SetSnapshot {
    pub set: Arc<AcceptedSet>,
    pub fetched_at: DateTime<Utc>,
}

/// Cached accepted-set entry with its fetch times.
struct CachedSet {
    set: Arc<AcceptedSet>,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

impl CachedSet {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }

    fn snapshot(&self) -> SetSnapshot {
        SetSnapshot { set: Arc::clone(&self.set), fetched_at: self.fetched_at_utc }
    }
}

/// Process-wide accepted-set source.
pub struct AcceptedSetSource {
    http: Client,
    config: AcceptedSetConfig,
    cache: RwLock<Option<CachedSet>>,
}

impl AcceptedSetSource {
    /// Create a source. Fails only if the HTTP client cannot be built.
    pub fn new(config: AcceptedSetConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        Ok(Self { http, config, cache: RwLock::new(None) })
    }

    /// Current accepted set.
    ///
    /// Never fails: upstream trouble degrades to a fallback set with a
    /// diagnostic note, cached like any other refresh outcome.
    pub async fn current(&self) -> SetSnapshot {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && !cached.is_expired(self.config.ttl)
            {
                tracing::debug!(items = cached.set.items.len(), "accepted-set cache hit");
                return cached.snapshot();
            }
        }

        let set = Arc::new(self.refresh().await);
        let cached = CachedSet { set, fetched_at: Instant::now(), fetched_at_utc: Utc::now() };
        let snapshot = cached.snapshot();
        *self.cache.write().await = Some(cached);
        snapshot
    }

    /// One upstream fetch, classified into a structurally valid set.
    async fn refresh(&self) -> AcceptedSet {
        let request = self
            .http
            .get(&self.config.source_url)
            .header("Accept", "application/json");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, url = %self.config.source_url, "accepted-set fetch failed");
                return AcceptedSet::fallback(UNREACHABLE_NOTE);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "accepted-set upstream returned an error status");
            return AcceptedSet::fallback(format!("upstream_fetch_failed:{}", status.as_u16()));
        }

        match response.json::<serde_json::Value>().await {
            Ok(value) => AcceptedSet::from_upstream(value),
            Err(e) => {
                tracing::warn!(error = %e, "accepted-set body was not valid json");
                AcceptedSet::fallback(INVALID_SHAPE_NOTE)
            }
        }
    }
}
