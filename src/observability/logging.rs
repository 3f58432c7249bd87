//! Structured logging.
//!
//! Diagnostics go through `tracing` to stderr; operator-facing output is
//! printed directly by the commands so it stays readable at the default
//! `warn` level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` wins, then the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Initialize the global subscriber. Later calls are ignored.
pub fn init(config: &ObservabilityConfig) {
    let result = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_ok() {
        tracing::debug!(log_level = %config.log_level, "Logging initialized");
    }
}
