//! CONVO Core - Wire Types
//!
//! Pure data structures for chat transcripts and agent configuration, as
//! exchanged with the conversational service. All other crates depend on
//! this. The only behavior here is validation of request shapes and the
//! transcript store that enforces cross-message invariants.

mod agent;
mod entities;
mod enums;
mod error;
mod identity;
mod message;
mod transcript;

pub use agent::{
    Agent, AgentToolMetadata, CreateAgent, CreateAgentToolMetadata, DeleteAgent,
    DeleteAgentToolMetadata, UpdateAgent, UpdateAgentToolMetadata,
};
pub use entities::{Citation, Document, File, JsonObject, ToolCall};
pub use enums::{MessageAgent, MessageAgentParseError};
pub use error::{ConfigError, ConvoError, ConvoResult, TranscriptError, ValidationError};
pub use identity::{format_timestamp, new_entity_id, new_message_id, Identified, Timestamp};
pub use message::{parse_timestamp, Message};
pub use transcript::Transcript;

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Active positions in a transcript are strictly increasing.
        #[test]
        fn prop_transcript_active_positions_increase(
            positions in proptest::collection::vec(0i64..20, 1..12)
        ) {
            let mut transcript = Transcript::new("c1");
            for (i, position) in positions.iter().enumerate() {
                let message = Message {
                    text: String::new(),
                    id: format!("m{}", i),
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                    updated_at: "2024-01-01T00:00:00Z".to_string(),
                    generation_id: None,
                    position: *position,
                    is_active: true,
                    documents: vec![],
                    citations: vec![],
                    files: vec![],
                    tool_calls: vec![],
                    tool_plan: None,
                    agent: MessageAgent::User,
                };
                // Rejections are expected; the invariant must hold regardless
                let _ = transcript.insert(message);
            }
            let active = transcript.active();
            for pair in active.windows(2) {
                prop_assert!(pair[0].position < pair[1].position);
            }
        }
    }
}
