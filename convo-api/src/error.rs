//! Error Types for the convo wire boundary
//!
//! Every payload rejected at the boundary maps to exactly one [`ErrorCode`],
//! so callers can tell a malformed document from a schema violation without
//! matching on message text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for rejected payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Payload exceeds the configured size limit
    PayloadTooLarge,

    /// Payload is not well-formed JSON
    MalformedPayload,

    /// JSON is well-formed but does not match the schema
    SchemaViolation,

    /// Strict mode rejected a key outside the schema
    UnknownField,

    /// Value could not be encoded
    EncodeFailed,
}

impl ErrorCode {
    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::PayloadTooLarge => "Payload exceeds size limit",
            ErrorCode::MalformedPayload => "Payload is not valid JSON",
            ErrorCode::SchemaViolation => "Payload does not match schema",
            ErrorCode::UnknownField => "Payload contains an unknown field",
            ErrorCode::EncodeFailed => "Failed to encode value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ErrorCode::SchemaViolation => "SCHEMA_VIOLATION",
            ErrorCode::UnknownField => "UNKNOWN_FIELD",
            ErrorCode::EncodeFailed => "ENCODE_FAILED",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// CODEC ERROR
// ============================================================================

/// Errors raised while decoding or encoding wire payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Malformed JSON at line {line}, column {column}: {reason}")]
    MalformedJson {
        reason: String,
        line: usize,
        column: usize,
    },

    #[error("Schema violation at line {line}, column {column}: {reason}")]
    SchemaViolation {
        reason: String,
        line: usize,
        column: usize,
    },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Encode failed: {reason}")]
    Encode { reason: String },
}

impl CodecError {
    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            CodecError::MalformedJson { .. } => ErrorCode::MalformedPayload,
            CodecError::SchemaViolation { .. } => ErrorCode::SchemaViolation,
            CodecError::UnknownField { .. } => ErrorCode::UnknownField,
            CodecError::Encode { .. } => ErrorCode::EncodeFailed,
        }
    }

    /// Classify a decode failure from serde_json.
    pub fn from_decode(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let reason = err.to_string();
        let (line, column) = (err.line(), err.column());
        match err.classify() {
            Category::Data => CodecError::SchemaViolation {
                reason,
                line,
                column,
            },
            Category::Syntax | Category::Eof | Category::Io => CodecError::MalformedJson {
                reason,
                line,
                column,
            },
        }
    }

    /// Wrap an encode failure from serde_json.
    pub fn from_encode(err: serde_json::Error) -> Self {
        CodecError::Encode {
            reason: err.to_string(),
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Structured error body for clients that report rejections upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CodecError> for ErrorBody {
    fn from(err: &CodecError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
