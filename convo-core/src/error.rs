//! Error types for convo operations

use thiserror::Error;

/// Validation errors for request shapes and parsed views.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Unknown tool: {tool}")]
    UnknownTool { tool: String },
}

/// Transcript store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Message {id} already exists in conversation {conversation_id}")]
    DuplicateId { conversation_id: String, id: String },

    #[error("Message not found: {id}")]
    NotFound { id: String },

    #[error("Position {position} conflicts with active position {last_active}")]
    PositionConflict { position: i64, last_active: i64 },

    #[error("Message {id} is not the active version")]
    InactiveVersion { id: String },

    #[error("Message {id}: updated_at {updated_at} is earlier than {floor}")]
    TimestampRegression {
        id: String,
        updated_at: String,
        floor: String,
    },

    #[error("Replacement for {id} changed {field}")]
    IdentityMismatch { id: String, field: String },
}

/// Configuration errors, returned directly by config loaders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvoError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

/// Result type alias for convo operations.
pub type ConvoResult<T> = Result<T, ConvoError>;
