//! waypost server entry point.
//!
//! Boots the HTTP listener: structured logging to stderr, layered config
//! from the environment, then the axum router over shared runtime state.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use waypost_client::{AcceptedSetConfig, AcceptedSetSource, TrustClient};
use waypost_core::AppConfig;

mod error;
mod headers;
mod routes;

/// Service name reported by the info endpoint and the OpenAPI document.
pub const SERVICE_NAME: &str = "waypost";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accepted: Arc<AcceptedSetSource>,
    pub trust: Arc<TrustClient>,
}

impl AppState {
    /// Build runtime state from validated configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, waypost_core::Error> {
        let accepted = AcceptedSetSource::new(AcceptedSetConfig {
            source_url: config.accepted_set_source_url(),
            ttl: config.accepted_set_ttl(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })?;

        let trust = TrustClient::new(&config.trust_root_base, config.timeout(), &config.user_agent)?;

        Ok(Self { config: Arc::new(config), accepted: Arc::new(accepted), trust: Arc::new(trust) })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::from_config(config)?;

    tracing::info!(
        %addr,
        trust_root = %state.config.trust_root_base,
        accepted_set = %state.config.accepted_set_source_url(),
        "starting waypost server"
    );

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
