//! Holidays HTTP API
//!
//! Exposes the aggregation operations of `holidays-core` over HTTP:
//! - `GET /api/holidays/{countryCode}`
//! - `GET /api/holidays/{year}/public-holidays?countryCodes=A&countryCodes=B`
//! - `GET /api/holidays/{year}/common-holidays?countryCode1=A&countryCode2=B`
//! - `GET /health`

pub mod error;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use anyhow::Context;
use holidays_core::aggregator::HolidayAggregator;
use holidays_core::config::Config;
use holidays_core::source::HttpHolidaySource;
use tokio::net::TcpListener;
use tracing::info;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;

/// Shared state handed to every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: Arc<HolidayAggregator>,
}

impl AppState {
    pub fn new(aggregator: HolidayAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }

    /// Build state backed by the configured upstream provider
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = HttpHolidaySource::new(&config.upstream)
            .context("Failed to create upstream holiday client")?;
        Ok(Self::new(HolidayAggregator::new(Arc::new(source))))
    }
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream.base_url,
        "Holidays API listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Holidays API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
