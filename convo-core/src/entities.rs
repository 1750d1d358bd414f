//! Collaborator types referenced by messages

use crate::identity::Identified;
use serde::{Deserialize, Serialize};

/// Free-form JSON object with preserved key order.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// A grounding link from a span of message text to supporting documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Citation {
    /// The cited span as it appears in the message text
    pub text: String,
    /// Start offset of the span (inclusive)
    pub start: i64,
    /// End offset of the span (exclusive)
    pub end: i64,
    /// Documents supporting the span, in relevance order
    pub document_ids: Vec<String>,
}

impl Citation {
    /// Length of the cited span, zero if the offsets are inverted.
    pub fn span_len(&self) -> u64 {
        u64::try_from(self.end.saturating_sub(self.start)).unwrap_or(0)
    }

    /// Whether `0 <= start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.start >= 0 && self.start <= self.end
    }

    /// Whether this citation points at the given document.
    pub fn cites(&self, document_id: &str) -> bool {
        self.document_ids.iter().any(|id| id == document_id)
    }
}

/// A reference source consulted or produced alongside a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Document {
    pub text: String,
    pub document_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    /// Tool-specific structured fields
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub fields: Option<JsonObject>,
    /// Tool that produced the document, if any
    pub tool_name: Option<String>,
}

impl Identified for Document {
    fn key(&self) -> &str {
        &self.document_id
    }
}

/// An attachment uploaded to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct File {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
    pub conversation_id: String,
    pub file_name: String,
    pub file_path: String,
    /// Size in bytes; omitted by older servers
    #[serde(default)]
    pub file_size: u64,
}

impl Identified for File {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A tool invocation requested or executed while producing a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub parameters: JsonObject,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: JsonObject::new(),
        }
    }

    /// Add a parameter, keeping insertion order.
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}
