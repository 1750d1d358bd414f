//! CONVO API - Wire Boundary
//!
//! Decodes and encodes convo schemas as JSON, classifying every rejected
//! payload by [`ErrorCode`]. Also carries the codec configuration, logging
//! setup, and the OpenAPI document generated from the core types.

pub mod codec;
pub mod config;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod telemetry;

// Re-export commonly used types
pub use codec::{
    decode, decode_agent, decode_create_agent, decode_list, decode_message, decode_messages,
    decode_update_agent, encode, encode_message, encode_messages, WireSchema,
};
pub use config::{CodecConfig, LogFormat, DEFAULT_MAX_PAYLOAD_BYTES};
pub use error::{CodecError, CodecResult, ErrorBody, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use telemetry::{init_logging, TelemetryError};
