//! Trust artifact pass-through client.
//!
//! Only the two fixed artifacts under `/.well-known/` are reachable
//! through the proxy, which keeps the forwarding surface closed. The
//! origin's status travels verbatim; the body is untouched.

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use url::Url;
use waypost_core::Error;

/// Accept header sent to the origin: JSON first, plain text close behind.
const ACCEPT: &str = "application/json,text/plain;q=0.9,*/*;q=0.1";

/// The two proxyable artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustArtifact {
    Deploy,
    Sha256,
}

impl TrustArtifact {
    /// Path of the artifact under the trust root.
    pub fn path(self) -> &'static str {
        match self {
            Self::Deploy => "/.well-known/deploy.txt",
            Self::Sha256 => "/.well-known/sha256.json",
        }
    }

    /// Content type used when the origin does not declare one.
    pub fn fallback_content_type(self) -> &'static str {
        match self {
            Self::Deploy => "text/plain; charset=utf-8",
            Self::Sha256 => "application/json; charset=utf-8",
        }
    }
}

/// Upstream response surfaced to the proxy handler.
#[derive(Debug, Clone)]
pub struct TrustPayload {
    /// Upstream status, passed through verbatim.
    pub status: u16,
    /// Upstream content type, or the artifact's fallback.
    pub content_type: String,
    /// Body bytes, unmodified.
    pub body: Bytes,
}

/// Client for the trust root origin.
pub struct TrustClient {
    http: Client,
    base: Url,
}

impl TrustClient {
    /// Build a client for the configured trust root.
    pub fn new(trust_root_base: &str, timeout: Duration, user_agent: &str) -> Result<Self, Error> {
        let base = Url::parse(trust_root_base).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        Ok(Self { http, base })
    }

    /// Fetch one artifact from the origin.
    ///
    /// A response of any status is a success at this layer; only
    /// transport failures become errors.
    pub async fn fetch(&self, artifact: TrustArtifact) -> Result<TrustPayload, Error> {
        let mut url = self.base.clone();
        url.set_path(artifact.path());

        let response = self
            .http
            .get(url)
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() { Error::Timeout(e.to_string()) } else { Error::Network(e.to_string()) }
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| artifact.fallback_content_type().to_string());

        let body = response.bytes().await.map_err(|e| Error::Network(e.to_string()))?;

        tracing::debug!(artifact = artifact.path(), status, bytes = body.len(), "trust artifact fetched");

        Ok(TrustPayload { status, content_type, body })
    }
}
