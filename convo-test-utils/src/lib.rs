//! CONVO Test Utilities
//!
//! Centralized test infrastructure for the convo workspace:
//! - Proptest generators for all wire types
//! - Test fixtures for common conversations
//! - Custom assertions for convo-specific validation

// Re-export core types for convenience
pub use convo_core::{
    Agent, AgentToolMetadata, Citation, ConvoError, ConvoResult, CreateAgent,
    CreateAgentToolMetadata, Document, File, Identified, JsonObject, Message, MessageAgent,
    ToolCall, Transcript, TranscriptError, UpdateAgent, ValidationError,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating convo wire types.

    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    // === Primitive Generators ===

    /// Generate an opaque identifier.
    pub fn arb_id() -> impl Strategy<Value = String> {
        "[a-z0-9]{8}(-[a-z0-9]{4}){0,3}"
    }

    /// Generate an RFC 3339 timestamp string (2020-2030).
    pub fn arb_timestamp_string() -> impl Strategy<Value = String> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0)
                .map(|ts| convo_core::format_timestamp(&ts))
                .unwrap_or_else(|| "2024-01-01T00:00:00Z".to_string())
        })
    }

    /// Generate an ordered `(created_at, updated_at)` pair.
    pub fn arb_timestamp_pair() -> impl Strategy<Value = (String, String)> {
        (1577836800i64..1893456000i64, 0i64..86_400).prop_map(|(created, delta)| {
            let fmt = |secs: i64| {
                chrono::DateTime::from_timestamp(secs, 0)
                    .map(|ts| convo_core::format_timestamp(&ts))
                    .unwrap_or_else(|| "2024-01-01T00:00:00Z".to_string())
            };
            (fmt(created), fmt(created + delta))
        })
    }

    /// Generate a scalar JSON value (no floats, so equality survives a round trip).
    pub fn arb_json_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
        ]
    }

    /// Generate a small JSON object.
    pub fn arb_json_object() -> impl Strategy<Value = JsonObject> {
        prop::collection::vec(("[a-z_]{1,10}", arb_json_scalar()), 0..4)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    // === Enum Generators ===

    /// Generate a MessageAgent variant.
    pub fn arb_message_agent() -> impl Strategy<Value = MessageAgent> {
        prop_oneof![Just(MessageAgent::User), Just(MessageAgent::Chatbot)]
    }

    // === Collaborator Generators ===

    /// Generate a Citation with a well-formed span.
    pub fn arb_citation() -> impl Strategy<Value = Citation> {
        (
            "[a-zA-Z ]{1,30}",
            0i64..500,
            0i64..100,
            prop::collection::vec(arb_id(), 0..3),
        )
            .prop_map(|(text, start, len, document_ids)| Citation {
                text,
                start,
                end: start + len,
                document_ids,
            })
    }

    /// Generate a Document.
    pub fn arb_document() -> impl Strategy<Value = Document> {
        (
            ".{0,60}",
            arb_id(),
            proptest::option::of("[A-Z][a-z ]{0,20}"),
            proptest::option::of("https://example\\.com/[a-z]{1,10}"),
            proptest::option::of(arb_json_object()),
            proptest::option::of("[a-z_]{3,15}"),
        )
            .prop_map(|(text, document_id, title, url, fields, tool_name)| Document {
                text,
                document_id,
                title,
                url,
                fields,
                tool_name,
            })
    }

    /// Generate a File.
    pub fn arb_file() -> impl Strategy<Value = File> {
        (
            arb_id(),
            arb_timestamp_pair(),
            arb_id(),
            arb_id(),
            "[a-z]{1,12}\\.(txt|pdf|csv)",
            any::<u32>(),
        )
            .prop_map(
                |(id, (created_at, updated_at), user_id, conversation_id, file_name, size)| File {
                    file_path: format!("/uploads/{}", file_name),
                    id,
                    created_at,
                    updated_at,
                    user_id,
                    conversation_id,
                    file_name,
                    file_size: u64::from(size),
                },
            )
    }

    /// Generate a ToolCall.
    pub fn arb_tool_call() -> impl Strategy<Value = ToolCall> {
        ("[a-z_]{3,15}", arb_json_object())
            .prop_map(|(name, parameters)| ToolCall { name, parameters })
    }

    // === Message Generators ===

    /// Generate a Message at the given position.
    pub fn arb_message_at(position: i64) -> impl Strategy<Value = Message> {
        (
            (
                ".{0,80}",
                arb_id(),
                arb_timestamp_pair(),
                proptest::option::of(arb_id()),
                any::<bool>(),
            ),
            (
                prop::collection::vec(arb_document(), 0..3),
                prop::collection::vec(arb_citation(), 0..3),
                prop::collection::vec(arb_file(), 0..2),
                prop::collection::vec(arb_tool_call(), 0..3),
                proptest::option::of("[A-Za-z ,.]{0,40}"),
                arb_message_agent(),
            ),
        )
            .prop_map(
                move |(
                    (text, id, (created_at, updated_at), generation_id, is_active),
                    (documents, citations, files, tool_calls, tool_plan, agent),
                )| Message {
                    text,
                    id,
                    created_at,
                    updated_at,
                    generation_id,
                    position,
                    is_active,
                    documents,
                    citations,
                    files,
                    tool_calls,
                    tool_plan,
                    agent,
                },
            )
    }

    /// Generate a Message at any non-negative position.
    pub fn arb_message() -> impl Strategy<Value = Message> {
        (0i64..10_000).prop_flat_map(arb_message_at)
    }

    /// Generate a valid active conversation: unique ids, positions 0..n,
    /// alternating user and chatbot turns.
    pub fn arb_conversation(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
        prop::collection::vec(arb_message(), 0..=max_len).prop_map(|messages| {
            messages
                .into_iter()
                .enumerate()
                .map(|(i, m)| {
                    let agent = if i % 2 == 0 {
                        MessageAgent::User
                    } else {
                        MessageAgent::Chatbot
                    };
                    Message {
                        id: format!("{}-{}", m.id, i),
                        position: i as i64,
                        is_active: true,
                        agent,
                        ..m
                    }
                })
                .collect()
        })
    }

    // === Agent Generators ===

    /// Generate a temperature that round-trips exactly through JSON.
    pub fn arb_temperature() -> impl Strategy<Value = f64> {
        (0u32..=100).prop_map(|n| f64::from(n) / 100.0)
    }

    /// Generate an Agent.
    pub fn arb_agent() -> impl Strategy<Value = Agent> {
        (
            (arb_id(), arb_id(), arb_timestamp_pair(), 1i64..20),
            (
                "[A-Z][a-z]{2,15}",
                proptest::option::of("[A-Za-z ]{0,40}"),
                proptest::option::of("[A-Za-z .]{0,80}"),
                arb_temperature(),
                prop::collection::vec("[a-z_]{3,12}", 0..4),
            ),
        )
            .prop_map(
                |(
                    (id, user_id, (created_at, updated_at), version),
                    (name, description, preamble, temperature, tools),
                )| Agent {
                    id,
                    user_id,
                    created_at,
                    updated_at,
                    version,
                    name,
                    description,
                    preamble,
                    temperature,
                    model: "command-r-plus".to_string(),
                    deployment: "Cohere Platform".to_string(),
                    tools,
                    tools_metadata: vec![],
                },
            )
    }

    /// Generate a tool metadata request, optionally with a client id.
    pub fn arb_create_tool_metadata() -> impl Strategy<Value = CreateAgentToolMetadata> {
        (
            proptest::option::of(arb_id()),
            "[a-z_]{3,12}",
            prop::collection::vec(arb_json_object(), 0..3),
        )
            .prop_map(|(id, tool_name, artifacts)| CreateAgentToolMetadata {
                id,
                tool_name,
                artifacts,
            })
    }

    /// Generate tool metadata requests with distinct tool names.
    pub fn arb_tool_metadata_list() -> impl Strategy<Value = Vec<CreateAgentToolMetadata>> {
        prop::collection::vec(arb_create_tool_metadata(), 0..4).prop_map(|entries| {
            let mut seen = std::collections::HashSet::new();
            entries
                .into_iter()
                .filter(|entry| seen.insert(entry.tool_name.clone()))
                .collect()
        })
    }

    /// Generate a CreateAgent request whose metadata names listed tools.
    pub fn arb_create_agent() -> impl Strategy<Value = CreateAgent> {
        (
            (
                "[A-Z][a-z]{2,15}",
                proptest::option::of(1i64..20),
                proptest::option::of("[A-Za-z ]{0,40}"),
                proptest::option::of("[A-Za-z .]{0,80}"),
                proptest::option::of(arb_temperature()),
            ),
            proptest::option::of(arb_tool_metadata_list()),
        )
            .prop_map(
                |((name, version, description, preamble, temperature), tools_metadata)| {
                    let tools = tools_metadata
                        .as_ref()
                        .map(|entries| entries.iter().map(|m| m.tool_name.clone()).collect());
                    CreateAgent {
                        name,
                        version,
                        description,
                        preamble,
                        temperature,
                        model: "command-r-plus".to_string(),
                        deployment: "Cohere Platform".to_string(),
                        tools,
                        tools_metadata,
                    }
                },
            )
    }

    /// Generate an UpdateAgent with any subset of fields set.
    pub fn arb_update_agent() -> impl Strategy<Value = UpdateAgent> {
        (
            (
                proptest::option::of("[A-Z][a-z]{2,15}"),
                proptest::option::of(1i64..20),
                proptest::option::of("[A-Za-z ]{0,40}"),
                proptest::option::of("[A-Za-z .]{0,80}"),
                proptest::option::of(arb_temperature()),
            ),
            proptest::option::of(prop::collection::vec("[a-z_]{3,12}", 0..4)),
            proptest::option::of(arb_tool_metadata_list()),
        )
            .prop_map(
                |((name, version, description, preamble, temperature), tools, tools_metadata)| {
                    UpdateAgent {
                        name,
                        version,
                        description,
                        preamble,
                        temperature,
                        model: None,
                        deployment: None,
                        tools,
                        tools_metadata,
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built wire values for common test scenarios.

    use super::*;

    /// The canonical example: a human "Hello" at position 0.
    pub fn example_message() -> Message {
        user_message("m1", 0, "Hello")
    }

    /// The canonical example as JSON text.
    pub const EXAMPLE_MESSAGE_JSON: &str = r#"{"text":"Hello","id":"m1","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z","generation_id":null,"position":0,"is_active":true,"documents":[],"citations":[],"files":[],"tool_calls":[],"tool_plan":null,"agent":"USER"}"#;

    /// An active human-authored message.
    pub fn user_message(id: &str, position: i64, text: &str) -> Message {
        Message {
            text: text.to_string(),
            id: id.to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            generation_id: None,
            position,
            is_active: true,
            documents: vec![],
            citations: vec![],
            files: vec![],
            tool_calls: vec![],
            tool_plan: None,
            agent: MessageAgent::User,
        }
    }

    /// An active model reply.
    pub fn chatbot_reply(id: &str, position: i64, text: &str) -> Message {
        Message {
            generation_id: Some(format!("gen-{}", id)),
            agent: MessageAgent::Chatbot,
            ..user_message(id, position, text)
        }
    }

    /// A grounded model reply that searched the web and cites one document.
    pub fn grounded_reply(id: &str, position: i64) -> Message {
        let text = "The capital of France is Paris.";
        Message {
            documents: vec![Document {
                text: "Paris is the capital and largest city of France.".to_string(),
                document_id: "web_search:0".to_string(),
                title: Some("Paris".to_string()),
                url: Some("https://en.wikipedia.org/wiki/Paris".to_string()),
                fields: None,
                tool_name: Some("web_search".to_string()),
            }],
            citations: vec![Citation {
                text: "Paris".to_string(),
                start: 25,
                end: 30,
                document_ids: vec!["web_search:0".to_string()],
            }],
            tool_calls: vec![ToolCall::new("web_search")
                .with_parameter("query", serde_json::json!("capital of France"))],
            tool_plan: Some("I will search for the capital of France.".to_string()),
            ..chatbot_reply(id, position, text)
        }
    }

    /// A two-turn conversation: user question then grounded reply.
    pub fn simple_conversation() -> Vec<Message> {
        vec![
            user_message("m1", 0, "What is the capital of France?"),
            grounded_reply("m2", 1),
        ]
    }

    /// A configured agent with web search enabled.
    pub fn research_agent() -> Agent {
        Agent {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            version: 1,
            name: "Researcher".to_string(),
            description: Some("Answers with citations".to_string()),
            preamble: None,
            temperature: 0.3,
            model: "command-r-plus".to_string(),
            deployment: "Cohere Platform".to_string(),
            tools: vec!["web_search".to_string()],
            tools_metadata: vec![],
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for convo results and transcripts.

    use super::*;

    /// Assert that a result is Ok.
    pub fn assert_ok<T: std::fmt::Debug>(result: &ConvoResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got {:?}", result);
    }

    /// Assert that a result is a transcript error.
    pub fn assert_transcript_error<T: std::fmt::Debug>(result: &ConvoResult<T>) {
        assert!(
            matches!(result, Err(ConvoError::Transcript(_))),
            "Expected TranscriptError, got {:?}",
            result
        );
    }

    /// Assert that a result is a duplicate id rejection.
    pub fn assert_duplicate_id<T: std::fmt::Debug>(result: &ConvoResult<T>, id: &str) {
        match result {
            Err(ConvoError::Transcript(TranscriptError::DuplicateId { id: got, .. })) => {
                assert_eq!(got, id, "Expected duplicate {}, got {}", id, got);
            }
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
    }

    /// Assert that a result is a validation error.
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &Result<T, ValidationError>) {
        assert!(result.is_err(), "Expected ValidationError, got {:?}", result);
    }

    /// Assert that active messages have strictly increasing positions.
    pub fn assert_active_positions_increasing(transcript: &Transcript) {
        let active = transcript.active();
        for pair in active.windows(2) {
            assert!(
                pair[0].position < pair[1].position,
                "Active positions not increasing: {} then {}",
                pair[0].position,
                pair[1].position
            );
        }
    }

    /// Assert that every message id in the slice is unique.
    pub fn assert_unique_ids(messages: &[Message]) {
        let mut seen = std::collections::HashSet::new();
        for message in messages {
            assert!(seen.insert(message.key()), "Duplicate id {}", message.id);
        }
    }
}
