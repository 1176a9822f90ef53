//! Tracing subscriber setup.
//!
//! Human-readable output for development, Bunyan-style JSON lines for
//! deployments that ship logs to a collector. `RUST_LOG` takes precedence
//! over the configured level.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AppError;

/// Name reported in JSON log records
const APP_NAME: &str = "wellness-core";

fn build_filter(level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global tracing subscriber.
///
/// Returns a `Config` error if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stdout))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };

    installed.map_err(|e| AppError::Config(format!("Tracing already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert!(build_filter("info").is_ok());
            assert!(build_filter("wellness_core=debug,sqlx=warn").is_ok());
            assert!(matches!(build_filter("wellness=loud"), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(AppError::Config(_))));
    }
}
