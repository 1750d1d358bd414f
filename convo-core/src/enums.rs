//! Enum types for convo entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which party authored a message: a human participant or the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageAgent {
    User,
    Chatbot,
}

impl MessageAgent {
    /// All variants in wire order.
    pub const ALL: [MessageAgent; 2] = [MessageAgent::User, MessageAgent::Chatbot];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageAgent::User => "USER",
            MessageAgent::Chatbot => "CHATBOT",
        }
    }

    /// Parse from a string, ignoring case.
    pub fn from_wire_str(s: &str) -> Result<Self, MessageAgentParseError> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(MessageAgent::User),
            "CHATBOT" => Ok(MessageAgent::Chatbot),
            _ => Err(MessageAgentParseError(s.to_string())),
        }
    }
}

impl fmt::Display for MessageAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageAgent {
    type Err = MessageAgentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_str(s)
    }
}

/// Error when parsing an invalid message agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAgentParseError(pub String);

impl fmt::Display for MessageAgentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid message agent: {}", self.0)
    }
}

impl std::error::Error for MessageAgentParseError {}
