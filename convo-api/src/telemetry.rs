//! Logging Initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! JSON or a pretty fmt layer. Call once at startup, before decoding.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{CodecConfig, LogFormat};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "convo_api=debug,info";

/// Error returned when a global subscriber is already installed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to init subscriber: {0}")]
pub struct TelemetryError(String);

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &CodecConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError(e.to_string()))?;

    tracing::info!(
        log_format = ?config.log_format,
        max_payload_bytes = config.max_payload_bytes,
        strict_fields = config.strict_fields,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = CodecConfig::default();
        // The first call may lose a race with another test's subscriber
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
