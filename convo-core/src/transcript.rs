//! In-memory owning store for one conversation's messages
//!
//! [`Message`] values do not police cross-message rules on their own. The
//! transcript does: ids are unique, active positions strictly increase, and
//! timestamps never run backwards when they can be parsed. Edits and
//! regenerations swap whole instances; nothing is mutated in place.

use crate::error::{ConvoResult, TranscriptError};
use crate::identity::{Identified, Timestamp};
use crate::message::Message;
use std::collections::HashMap;

/// Ordered message history for a single conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    conversation_id: String,
    /// Every version ever stored, in insertion order
    messages: Vec<Message>,
    index: HashMap<String, usize>,
}

impl Transcript {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            messages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a transcript, inserting messages in the given order.
    pub fn from_messages(
        conversation_id: impl Into<String>,
        messages: impl IntoIterator<Item = Message>,
    ) -> ConvoResult<Self> {
        let mut transcript = Self::new(conversation_id);
        for message in messages {
            transcript.insert(message)?;
        }
        Ok(transcript)
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.index.get(id).map(|&i| &self.messages[i])
    }

    /// Active messages in position order.
    pub fn active(&self) -> Vec<&Message> {
        let mut active: Vec<&Message> = self.messages.iter().filter(|m| m.is_active).collect();
        active.sort_by_key(|m| m.position);
        active
    }

    /// The active message with the highest position.
    pub fn latest_active(&self) -> Option<&Message> {
        self.messages
            .iter()
            .filter(|m| m.is_active)
            .max_by_key(|m| m.position)
    }

    /// Every stored version at `position`, in insertion order.
    pub fn versions_at(&self, position: i64) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.position == position)
            .collect()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Store a new message.
    pub fn insert(&mut self, message: Message) -> ConvoResult<()> {
        self.ensure_new_id(&message)?;
        ensure_not_regressed(&message.id, &message.created_at, &message.updated_at)?;
        if message.is_active {
            if let Some(last) = self.latest_active() {
                if message.position <= last.position {
                    return Err(TranscriptError::PositionConflict {
                        position: message.position,
                        last_active: last.position,
                    }
                    .into());
                }
            }
        }
        self.push(message);
        Ok(())
    }

    /// Replace the active message `old_id` with a new version at the same
    /// position. Returns the deactivated copy of the old version.
    pub fn supersede(&mut self, old_id: &str, replacement: Message) -> ConvoResult<Message> {
        let old_index = self.index_of(old_id)?;
        let old = &self.messages[old_index];
        if !old.is_active {
            return Err(TranscriptError::InactiveVersion {
                id: old_id.to_string(),
            }
            .into());
        }
        if !replacement.is_active {
            return Err(TranscriptError::IdentityMismatch {
                id: old_id.to_string(),
                field: "is_active".to_string(),
            }
            .into());
        }
        if replacement.position != old.position {
            return Err(TranscriptError::IdentityMismatch {
                id: old_id.to_string(),
                field: "position".to_string(),
            }
            .into());
        }
        self.ensure_new_id(&replacement)?;
        ensure_not_regressed(
            &replacement.id,
            &replacement.created_at,
            &replacement.updated_at,
        )?;
        // The deactivated copy takes the replacement's updated_at
        ensure_not_regressed(old_id, &old.created_at, &replacement.updated_at)?;
        ensure_not_regressed(old_id, &old.updated_at, &replacement.updated_at)?;

        let deactivated = Message {
            is_active: false,
            updated_at: replacement.updated_at.clone(),
            ..old.clone()
        };
        self.messages[old_index] = deactivated.clone();
        self.push(replacement);
        Ok(deactivated)
    }

    /// Swap in a newer instance of an existing message. Returns the
    /// previous instance.
    pub fn replace(&mut self, updated: Message) -> ConvoResult<Message> {
        let i = self.index_of(&updated.id)?;
        let current = &self.messages[i];
        for (field, changed) in [
            ("position", current.position != updated.position),
            ("is_active", current.is_active != updated.is_active),
        ] {
            if changed {
                return Err(TranscriptError::IdentityMismatch {
                    id: updated.id.clone(),
                    field: field.to_string(),
                }
                .into());
            }
        }
        ensure_not_regressed(&updated.id, &current.updated_at, &updated.updated_at)?;
        ensure_not_regressed(&updated.id, &updated.created_at, &updated.updated_at)?;
        Ok(std::mem::replace(&mut self.messages[i], updated))
    }

    fn push(&mut self, message: Message) {
        self.index.insert(message.key().to_string(), self.messages.len());
        self.messages.push(message);
    }

    fn index_of(&self, id: &str) -> Result<usize, TranscriptError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TranscriptError::NotFound { id: id.to_string() })
    }

    fn ensure_new_id(&self, message: &Message) -> Result<(), TranscriptError> {
        if self.contains(message.key()) {
            return Err(TranscriptError::DuplicateId {
                conversation_id: self.conversation_id.clone(),
                id: message.id.clone(),
            });
        }
        Ok(())
    }
}

/// Reject `later` earlier than `floor` when both parse as RFC 3339.
///
/// Timestamps are opaque on the wire, so unparseable values pass.
fn ensure_not_regressed(id: &str, floor: &str, later: &str) -> Result<(), TranscriptError> {
    let parsed = |value: &str| -> Option<Timestamp> {
        chrono::DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|ts| ts.with_timezone(&chrono::Utc))
    };
    if let (Some(floor_ts), Some(later_ts)) = (parsed(floor), parsed(later)) {
        if later_ts < floor_ts {
            return Err(TranscriptError::TimestampRegression {
                id: id.to_string(),
                updated_at: later.to_string(),
                floor: floor.to_string(),
            });
        }
    }
    Ok(())
}
