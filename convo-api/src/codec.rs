//! JSON Codec - the wire boundary
//!
//! Decoding checks the size limit, optionally rejects undeclared top-level
//! keys, then deserializes the typed shape from the original bytes. Required
//! fields are never defaulted: a missing, repeated, or mistyped field is a
//! [`CodecError::SchemaViolation`].

use convo_core::{Agent, CreateAgent, Message, UpdateAgent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};

/// A type decoded at the wire boundary.
pub trait WireSchema: DeserializeOwned + Serialize {
    /// Schema name used in logs.
    const SCHEMA: &'static str;

    /// Top-level keys the schema declares.
    const FIELDS: &'static [&'static str];
}

impl WireSchema for Message {
    const SCHEMA: &'static str = "Message";
    const FIELDS: &'static [&'static str] = &Message::FIELD_NAMES;
}

impl WireSchema for Agent {
    const SCHEMA: &'static str = "Agent";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "user_id",
        "created_at",
        "updated_at",
        "version",
        "name",
        "description",
        "preamble",
        "temperature",
        "model",
        "deployment",
        "tools",
        "tools_metadata",
    ];
}

impl WireSchema for CreateAgent {
    const SCHEMA: &'static str = "CreateAgent";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "version",
        "description",
        "preamble",
        "temperature",
        "model",
        "deployment",
        "tools",
        "tools_metadata",
    ];
}

impl WireSchema for UpdateAgent {
    const SCHEMA: &'static str = "UpdateAgent";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "version",
        "description",
        "preamble",
        "temperature",
        "model",
        "deployment",
        "tools",
        "tools_metadata",
    ];
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a single value of schema `T`.
pub fn decode<T: WireSchema>(bytes: &[u8], config: &CodecConfig) -> CodecResult<T> {
    check_size::<T>(bytes, config)?;
    if config.strict_fields {
        check_fields::<T>(&parse_document::<T>(bytes)?)?;
    }
    from_slice::<T, T>(bytes)
}

/// Decode a JSON array of values of schema `T`, preserving order.
pub fn decode_list<T: WireSchema>(bytes: &[u8], config: &CodecConfig) -> CodecResult<Vec<T>> {
    check_size::<T>(bytes, config)?;
    if config.strict_fields {
        if let Value::Array(items) = parse_document::<T>(bytes)? {
            for item in &items {
                check_fields::<T>(item)?;
            }
        }
    }
    let items = from_slice::<T, Vec<T>>(bytes)?;
    tracing::trace!(schema = T::SCHEMA, count = items.len(), "Decoded list");
    Ok(items)
}

pub fn decode_message(bytes: &[u8], config: &CodecConfig) -> CodecResult<Message> {
    decode(bytes, config)
}

pub fn decode_messages(bytes: &[u8], config: &CodecConfig) -> CodecResult<Vec<Message>> {
    decode_list(bytes, config)
}

pub fn decode_agent(bytes: &[u8], config: &CodecConfig) -> CodecResult<Agent> {
    decode(bytes, config)
}

pub fn decode_create_agent(bytes: &[u8], config: &CodecConfig) -> CodecResult<CreateAgent> {
    decode(bytes, config)
}

pub fn decode_update_agent(bytes: &[u8], config: &CodecConfig) -> CodecResult<UpdateAgent> {
    decode(bytes, config)
}

fn check_size<T: WireSchema>(bytes: &[u8], config: &CodecConfig) -> CodecResult<()> {
    if bytes.len() > config.max_payload_bytes {
        tracing::debug!(
            schema = T::SCHEMA,
            size = bytes.len(),
            limit = config.max_payload_bytes,
            "Rejected oversized payload"
        );
        return Err(CodecError::PayloadTooLarge {
            size: bytes.len(),
            limit: config.max_payload_bytes,
        });
    }
    Ok(())
}

/// Untyped view used only for the top-level key check.
fn parse_document<T: WireSchema>(bytes: &[u8]) -> CodecResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| reject::<T>(CodecError::from_decode(e)))
}

fn check_fields<T: WireSchema>(value: &Value) -> CodecResult<()> {
    if let Value::Object(map) = value {
        if let Some(field) = map.keys().find(|k| !T::FIELDS.contains(&k.as_str())) {
            return Err(reject::<T>(CodecError::UnknownField {
                field: field.clone(),
            }));
        }
    }
    Ok(())
}

/// Typed decode straight from the bytes, so errors carry source positions
/// and repeated keys are reported instead of merged.
fn from_slice<S: WireSchema, T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(bytes).map_err(|e| reject::<S>(CodecError::from_decode(e)))
}

fn reject<T: WireSchema>(err: CodecError) -> CodecError {
    tracing::debug!(schema = T::SCHEMA, code = %err.code(), error = %err, "Rejected payload");
    err
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode a value as compact JSON bytes.
pub fn encode<T: Serialize>(value: &T) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(CodecError::from_encode)
}

pub fn encode_message(message: &Message) -> CodecResult<Vec<u8>> {
    encode(message)
}

pub fn encode_messages(messages: &[Message]) -> CodecResult<Vec<u8>> {
    encode(&messages)
}
