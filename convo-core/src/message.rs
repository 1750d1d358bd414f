//! Chat message wire type

use crate::entities::{Citation, Document, File, ToolCall};
use crate::enums::MessageAgent;
use crate::error::ValidationError;
use crate::identity::{Identified, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

/// One turn in a conversation transcript, as exchanged with the service.
///
/// Messages are immutable values. An edit or regeneration is a new
/// instance; the owning [`Transcript`](crate::Transcript) swaps it in.
///
/// Structural equality compares every field. Use [`Identified::same_entity`]
/// to ask whether two instances describe the same logical message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    /// Textual content, possibly empty
    pub text: String,
    pub id: String,
    /// Opaque timestamp, ISO-8601 by convention
    pub created_at: String,
    /// Opaque timestamp, never earlier than `created_at`
    pub updated_at: String,
    /// Generation that produced this message; null for human-authored text
    #[serde(deserialize_with = "required_nullable")]
    pub generation_id: Option<String>,
    /// Ordering index within the conversation
    pub position: i64,
    /// Whether this is the live version of its position
    pub is_active: bool,
    pub documents: Vec<Document>,
    /// Citations in order of appearance in `text`
    pub citations: Vec<Citation>,
    pub files: Vec<File>,
    /// Tool calls in request order
    pub tool_calls: Vec<ToolCall>,
    #[serde(deserialize_with = "required_nullable")]
    pub tool_plan: Option<String>,
    pub agent: MessageAgent,
}

impl Message {
    /// Exact wire field names, in declaration order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "text",
        "id",
        "created_at",
        "updated_at",
        "generation_id",
        "position",
        "is_active",
        "documents",
        "citations",
        "files",
        "tool_calls",
        "tool_plan",
        "agent",
    ];

    /// Whether the message came out of a model generation.
    pub fn is_generated(&self) -> bool {
        self.generation_id.is_some()
    }

    /// Whether the message planned or requested any tool use.
    pub fn has_tool_activity(&self) -> bool {
        self.tool_plan.is_some() || !self.tool_calls.is_empty()
    }

    /// Parse `created_at` as RFC 3339.
    pub fn created_at_utc(&self) -> Result<Timestamp, ValidationError> {
        parse_timestamp("created_at", &self.created_at)
    }

    /// Parse `updated_at` as RFC 3339.
    pub fn updated_at_utc(&self) -> Result<Timestamp, ValidationError> {
        parse_timestamp("updated_at", &self.updated_at)
    }
}

impl Identified for Message {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Parse an opaque wire timestamp as RFC 3339, normalized to UTC.
pub fn parse_timestamp(field: &str, value: &str) -> Result<Timestamp, ValidationError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(|_| ValidationError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Nullable but required: the key must be present, `null` is allowed.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
