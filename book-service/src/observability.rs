//! Structured logging

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize JSON tracing output filtered by `service.log_level`
///
/// `RUST_LOG`, when set, takes precedence over the configured level. An
/// unparseable level falls back to `info`. Calling this again after a
/// subscriber is installed is a no-op.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!("Tracing initialized for service: {}", config.service.name);
    Ok(())
}
