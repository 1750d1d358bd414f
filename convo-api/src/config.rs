//! Codec Configuration Module
//!
//! Limits and strictness for the wire boundary, plus the log output format.
//! Loaded from environment variables with sensible defaults for development.

use convo_core::ConfigError;
use std::str::FromStr;

/// Default payload limit: 4 MiB.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidValue {
                field: "log_format".to_string(),
                value: s.to_string(),
                reason: "expected \"json\" or \"pretty\"".to_string(),
            }),
        }
    }
}

// ============================================================================
// CODEC CONFIGURATION
// ============================================================================

/// Configuration for decoding wire payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Payloads larger than this are rejected before parsing.
    pub max_payload_bytes: usize,

    /// Reject top-level keys the schema does not declare.
    /// Off by default so newer servers can add fields.
    pub strict_fields: bool,

    /// Output format used by [`crate::telemetry::init_logging`].
    pub log_format: LogFormat,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            strict_fields: false,
            log_format: LogFormat::Json,
        }
    }
}

impl CodecConfig {
    /// Create CodecConfig from environment variables.
    ///
    /// Environment variables:
    /// - `CONVO_MAX_PAYLOAD_BYTES`: Size limit in bytes (default: 4194304)
    /// - `CONVO_STRICT_FIELDS`: "true" or "false" (default: false)
    /// - `CONVO_LOG_FORMAT`: "json" or "pretty" (default: json)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take defaults;
    /// set-but-invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_payload_bytes = match lookup("CONVO_MAX_PAYLOAD_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "max_payload_bytes".to_string(),
                value: raw.clone(),
                reason: "must be an unsigned integer".to_string(),
            })?,
            None => defaults.max_payload_bytes,
        };

        let strict_fields = match lookup("CONVO_STRICT_FIELDS") {
            Some(raw) => parse_bool("strict_fields", &raw)?,
            None => defaults.strict_fields,
        };

        let log_format = match lookup("CONVO_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        let config = Self {
            max_payload_bytes,
            strict_fields,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_payload_bytes".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Builder-style strictness toggle.
    pub fn with_strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    /// Builder-style payload limit.
    pub fn with_max_payload_bytes(mut self, limit: usize) -> Self {
        self.max_payload_bytes = limit;
        self
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}
