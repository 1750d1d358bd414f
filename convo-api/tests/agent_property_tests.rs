//! Property-Based Tests for Agent Schemas
//!
//! **Property 1: Round Trip (Agent)**
//!
//! For any agent, encoding then decoding SHALL yield an equal agent.
//!
//! **Property 2: Partial Update (Agent)**
//!
//! Applying an update SHALL change exactly the fields the update carries,
//! and an empty update SHALL change nothing but `updated_at`.
//!
//! **Property 3: Creation (Agent)**
//!
//! A create request SHALL become an agent carrying its fields, with one
//! tool metadata record per requested entry, owned by the new agent.

use convo_api::{decode_agent, decode_update_agent, encode, CodecConfig, ErrorCode};
use convo_core::{Agent, UpdateAgent};
use convo_test_utils::fixtures;
use convo_test_utils::generators::{
    arb_agent, arb_create_agent, arb_timestamp_string, arb_update_agent,
};
use proptest::prelude::*;

fn strict() -> CodecConfig {
    CodecConfig::default().with_strict_fields(true)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_agent_round_trips_through_codec(agent in arb_agent()) {
        let bytes = encode(&agent).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = decode_agent(&bytes, &strict())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, agent);
    }

    #[test]
    fn prop_update_round_trips_through_codec(update in arb_update_agent()) {
        let bytes = encode(&update).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = decode_update_agent(&bytes, &strict())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, update);
    }

    #[test]
    fn prop_apply_update_changes_only_present_fields(
        agent in arb_agent(),
        update in arb_update_agent(),
        updated_at in arb_timestamp_string(),
    ) {
        let next = agent.apply_update(&update, &updated_at);

        prop_assert_eq!(&next.id, &agent.id);
        prop_assert_eq!(&next.user_id, &agent.user_id);
        prop_assert_eq!(&next.created_at, &agent.created_at);
        prop_assert_eq!(&next.updated_at, &updated_at);
        match &update.tools_metadata {
            Some(entries) => {
                let names: Vec<&str> =
                    next.tools_metadata.iter().map(|m| m.tool_name.as_str()).collect();
                let expected: Vec<&str> = entries.iter().map(|m| m.tool_name.as_str()).collect();
                prop_assert_eq!(names, expected);
                prop_assert!(next.tools_metadata.iter().all(|m| m.agent_id == agent.id));
            }
            None => prop_assert_eq!(&next.tools_metadata, &agent.tools_metadata),
        }

        prop_assert_eq!(&next.name, update.name.as_ref().unwrap_or(&agent.name));
        prop_assert_eq!(next.version, update.version.unwrap_or(agent.version));
        prop_assert_eq!(next.temperature, update.temperature.unwrap_or(agent.temperature));
        prop_assert_eq!(&next.tools, update.tools.as_ref().unwrap_or(&agent.tools));
        match &update.description {
            Some(description) => prop_assert_eq!(next.description.as_ref(), Some(description)),
            None => prop_assert_eq!(&next.description, &agent.description),
        }
    }

    #[test]
    fn prop_create_request_becomes_agent(
        request in arb_create_agent(),
        created_at in arb_timestamp_string(),
    ) {
        let known: Vec<&str> = request.tools.iter().flatten().map(String::as_str).collect();
        prop_assert_eq!(request.validate(&known), Ok(()));
        let stored = request.clone().into_agent("a1", "u1", &created_at, 0.3);

        prop_assert_eq!(&stored.name, &request.name);
        prop_assert_eq!(stored.version, request.version.unwrap_or(1));
        prop_assert_eq!(stored.temperature, request.temperature.unwrap_or(0.3));
        prop_assert_eq!(&stored.tools, &request.tools.clone().unwrap_or_default());
        prop_assert_eq!(&stored.updated_at, &created_at);

        let entries = request.tools_metadata.unwrap_or_default();
        prop_assert_eq!(stored.tools_metadata.len(), entries.len());
        for (metadata, entry) in stored.tools_metadata.iter().zip(&entries) {
            prop_assert_eq!(&metadata.tool_name, &entry.tool_name);
            prop_assert_eq!(&metadata.artifacts, &entry.artifacts);
            prop_assert_eq!(metadata.agent_id.as_str(), "a1");
            prop_assert_eq!(metadata.user_id.as_str(), "u1");
            if let Some(id) = &entry.id {
                prop_assert_eq!(&metadata.id, id);
            }
        }
    }

    #[test]
    fn prop_empty_update_is_identity(agent in arb_agent()) {
        let next = agent.apply_update(&UpdateAgent::default(), &agent.updated_at);
        prop_assert_eq!(next, agent);
    }
}

#[test]
fn test_agent_fixture_round_trips() {
    let agent = fixtures::research_agent();
    let bytes = encode(&agent).expect("encode");
    let decoded: Agent = decode_agent(&bytes, &strict()).expect("decode");
    assert_eq!(decoded, agent);
    assert!(decoded.has_tool("web_search"));
}

#[test]
fn test_agent_missing_model_is_schema_violation() {
    let mut value = serde_json::to_value(fixtures::research_agent()).expect("json");
    if let Some(map) = value.as_object_mut() {
        map.remove("model");
    }
    let bytes = serde_json::to_vec(&value).expect("bytes");
    let err = decode_agent(&bytes, &CodecConfig::default()).expect_err("missing model");
    assert_eq!(err.code(), ErrorCode::SchemaViolation);
}

#[test]
fn test_update_with_unknown_field_rejected_when_strict() {
    let payload = br#"{"name":"Renamed","owner":"u2"}"#;
    let lenient = decode_update_agent(payload, &CodecConfig::default()).expect("lenient");
    assert_eq!(lenient.name.as_deref(), Some("Renamed"));

    let err = decode_update_agent(payload, &strict()).expect_err("strict");
    assert_eq!(err.code(), ErrorCode::UnknownField);
}
