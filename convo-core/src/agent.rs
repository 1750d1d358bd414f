//! Agent configuration schemas
//!
//! Request and response shapes for agent management, plus the request
//! validation and update semantics the agent endpoints apply. Updates never
//! mutate: they produce a new value with the present fields replaced.

use crate::entities::JsonObject;
use crate::error::ValidationError;
use crate::identity::new_entity_id;
use serde::{Deserialize, Serialize};

/// Per-tool configuration attached to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AgentToolMetadata {
    pub id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub user_id: String,
    pub agent_id: String,
    pub tool_name: String,
    /// Tool-specific artifacts (e.g. selected folders or files)
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub artifacts: Vec<JsonObject>,
}

impl AgentToolMetadata {
    /// Return a copy with the fields present in `update` replaced.
    pub fn apply_update(&self, update: &UpdateAgentToolMetadata, updated_at: &str) -> Self {
        let mut next = self.clone();
        if let Some(tool_name) = &update.tool_name {
            next.tool_name = tool_name.clone();
        }
        if let Some(artifacts) = &update.artifacts {
            next.artifacts = artifacts.clone();
        }
        next.updated_at = Some(updated_at.to_string());
        next
    }
}

/// Request to attach tool metadata to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAgentToolMetadata {
    pub id: Option<String>,
    pub tool_name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub artifacts: Vec<JsonObject>,
}

impl CreateAgentToolMetadata {
    /// Build the stored record for this request.
    ///
    /// A client-supplied `id` wins over the generated one.
    pub fn into_metadata(
        self,
        id: String,
        user_id: impl Into<String>,
        agent_id: impl Into<String>,
        created_at: &str,
    ) -> AgentToolMetadata {
        AgentToolMetadata {
            id: self.id.unwrap_or(id),
            created_at: Some(created_at.to_string()),
            updated_at: Some(created_at.to_string()),
            user_id: user_id.into(),
            agent_id: agent_id.into(),
            tool_name: self.tool_name,
            artifacts: self.artifacts,
        }
    }
}

/// Request to update tool metadata. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAgentToolMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Object>>))]
    pub artifacts: Option<Vec<JsonObject>>,
}

/// Empty response for a tool metadata deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteAgentToolMetadata {}

/// A configured agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Agent {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub version: i64,
    pub name: String,
    pub description: Option<String>,
    pub preamble: Option<String>,
    pub temperature: f64,
    pub model: String,
    pub deployment: String,
    pub tools: Vec<String>,
    #[serde(default)]
    pub tools_metadata: Vec<AgentToolMetadata>,
}

impl Agent {
    /// Return a copy with the fields present in `update` replaced.
    ///
    /// A present `tools_metadata` list replaces the stored one. Entries for
    /// a tool that already has metadata keep its `id` and `created_at`.
    pub fn apply_update(&self, update: &UpdateAgent, updated_at: &str) -> Self {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(version) = update.version {
            next.version = version;
        }
        if let Some(description) = &update.description {
            next.description = Some(description.clone());
        }
        if let Some(preamble) = &update.preamble {
            next.preamble = Some(preamble.clone());
        }
        if let Some(temperature) = update.temperature {
            next.temperature = temperature;
        }
        if let Some(model) = &update.model {
            next.model = model.clone();
        }
        if let Some(deployment) = &update.deployment {
            next.deployment = deployment.clone();
        }
        if let Some(tools) = &update.tools {
            next.tools = tools.clone();
        }
        if let Some(entries) = &update.tools_metadata {
            next.tools_metadata = entries
                .iter()
                .map(|entry| self.merge_tool_metadata(entry, updated_at))
                .collect();
        }
        next.updated_at = updated_at.to_string();
        next
    }

    fn merge_tool_metadata(
        &self,
        entry: &CreateAgentToolMetadata,
        updated_at: &str,
    ) -> AgentToolMetadata {
        match self.tool_metadata(&entry.tool_name) {
            Some(existing) => AgentToolMetadata {
                artifacts: entry.artifacts.clone(),
                updated_at: Some(updated_at.to_string()),
                ..existing.clone()
            },
            None => entry.clone().into_metadata(
                new_entity_id(),
                self.user_id.as_str(),
                self.id.as_str(),
                updated_at,
            ),
        }
    }

    /// Whether the agent may call the named tool.
    pub fn has_tool(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }

    /// Tool metadata for the named tool, if configured.
    pub fn tool_metadata(&self, tool: &str) -> Option<&AgentToolMetadata> {
        self.tools_metadata.iter().find(|m| m.tool_name == tool)
    }
}

/// Request to create an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAgent {
    pub name: String,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    pub model: String,
    pub deployment: String,
    #[serde(default)]
    pub tools: Option<Vec<String>>,
    #[serde(default)]
    pub tools_metadata: Option<Vec<CreateAgentToolMetadata>>,
}

impl CreateAgent {
    /// Validate the request against the set of tools the service offers.
    pub fn validate(&self, known_tools: &[&str]) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("model", &self.model)?;
        require_non_blank("deployment", &self.deployment)?;
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature)?;
        }
        let tools = self.tools.as_deref().unwrap_or_default();
        validate_tools(tools, known_tools)?;
        if let Some(metadata) = &self.tools_metadata {
            validate_metadata_tools(metadata.iter().map(|m| m.tool_name.as_str()), tools)?;
        }
        Ok(())
    }

    /// Build the stored agent for this request.
    ///
    /// `version` defaults to 1 and `temperature` to `default_temperature`.
    /// Each `tools_metadata` entry becomes a record owned by the new agent.
    pub fn into_agent(
        self,
        id: impl Into<String>,
        user_id: impl Into<String>,
        created_at: &str,
        default_temperature: f64,
    ) -> Agent {
        let id = id.into();
        let user_id = user_id.into();
        let tools_metadata = self
            .tools_metadata
            .unwrap_or_default()
            .into_iter()
            .map(|entry| {
                entry.into_metadata(new_entity_id(), user_id.as_str(), id.as_str(), created_at)
            })
            .collect();
        Agent {
            id,
            user_id,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
            version: self.version.unwrap_or(1),
            name: self.name,
            description: self.description,
            preamble: self.preamble,
            temperature: self.temperature.unwrap_or(default_temperature),
            model: self.model,
            deployment: self.deployment,
            tools: self.tools.unwrap_or_default(),
            tools_metadata,
        }
    }
}

/// Request to update an agent. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAgent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub deployment: Option<String>,
    #[serde(default)]
    pub tools: Option<Vec<String>>,
    /// Replaces the agent's tool metadata when present
    #[serde(default)]
    pub tools_metadata: Option<Vec<CreateAgentToolMetadata>>,
}

impl UpdateAgent {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the fields that are present.
    pub fn validate(&self, known_tools: &[&str]) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(model) = &self.model {
            require_non_blank("model", model)?;
        }
        if let Some(deployment) = &self.deployment {
            require_non_blank("deployment", deployment)?;
        }
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature)?;
        }
        if let Some(tools) = &self.tools {
            validate_tools(tools, known_tools)?;
        }
        if let (Some(metadata), Some(tools)) = (&self.tools_metadata, &self.tools) {
            validate_metadata_tools(metadata.iter().map(|m| m.tool_name.as_str()), tools)?;
        }
        Ok(())
    }
}

/// Empty response for an agent deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteAgent {}

fn require_non_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_temperature(temperature: f64) -> Result<(), ValidationError> {
    if !temperature.is_finite() || !(0.0..=1.0).contains(&temperature) {
        return Err(ValidationError::InvalidValue {
            field: "temperature".to_string(),
            reason: format!("{} is outside [0, 1]", temperature),
        });
    }
    Ok(())
}

fn validate_tools(tools: &[String], known_tools: &[&str]) -> Result<(), ValidationError> {
    match tools.iter().find(|t| !known_tools.contains(&t.as_str())) {
        Some(tool) => Err(ValidationError::UnknownTool { tool: tool.clone() }),
        None => Ok(()),
    }
}

fn validate_metadata_tools<'a>(
    mut metadata_tools: impl Iterator<Item = &'a str>,
    tools: &[String],
) -> Result<(), ValidationError> {
    match metadata_tools.find(|name| !tools.iter().any(|t| t == name)) {
        Some(name) => Err(ValidationError::InvalidValue {
            field: "tools_metadata".to_string(),
            reason: format!("{} is not in tools", name),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KNOWN_TOOLS: &[&str] = &["web_search", "calculator", "read_document"];

    fn create_request() -> CreateAgent {
        CreateAgent {
            name: "Researcher".to_string(),
            version: None,
            description: Some("Finds things".to_string()),
            preamble: None,
            temperature: Some(0.3),
            model: "command-r-plus".to_string(),
            deployment: "Cohere Platform".to_string(),
            tools: Some(vec!["web_search".to_string()]),
            tools_metadata: Some(vec![CreateAgentToolMetadata {
                id: None,
                tool_name: "web_search".to_string(),
                artifacts: vec![],
            }]),
        }
    }

    fn agent() -> Agent {
        Agent {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            version: 1,
            name: "Researcher".to_string(),
            description: None,
            preamble: Some("Be concise.".to_string()),
            temperature: 0.3,
            model: "command-r-plus".to_string(),
            deployment: "Cohere Platform".to_string(),
            tools: vec!["web_search".to_string()],
            tools_metadata: vec![],
        }
    }

    #[test]
    fn test_create_agent_valid() {
        assert_eq!(create_request().validate(KNOWN_TOOLS), Ok(()));
    }

    #[test]
    fn test_create_agent_requires_name_model_deployment() {
        for field in ["name", "model", "deployment"] {
            let mut req = create_request();
            match field {
                "name" => req.name = "  ".to_string(),
                "model" => req.model = String::new(),
                _ => req.deployment = String::new(),
            }
            assert_eq!(
                req.validate(KNOWN_TOOLS),
                Err(ValidationError::RequiredFieldMissing {
                    field: field.to_string()
                })
            );
        }
    }

    #[test]
    fn test_create_agent_rejects_unknown_tool() {
        let mut req = create_request();
        req.tools = Some(vec!["web_search".to_string(), "teleport".to_string()]);
        assert_eq!(
            req.validate(KNOWN_TOOLS),
            Err(ValidationError::UnknownTool {
                tool: "teleport".to_string()
            })
        );
    }

    #[test]
    fn test_create_agent_rejects_metadata_for_unlisted_tool() {
        let mut req = create_request();
        req.tools_metadata = Some(vec![CreateAgentToolMetadata {
            id: None,
            tool_name: "calculator".to_string(),
            artifacts: vec![],
        }]);
        assert!(matches!(
            req.validate(KNOWN_TOOLS),
            Err(ValidationError::InvalidValue { field, .. }) if field == "tools_metadata"
        ));
    }

    #[test]
    fn test_create_agent_rejects_bad_temperature() {
        for temperature in [-0.1, 1.5, f64::NAN] {
            let mut req = create_request();
            req.temperature = Some(temperature);
            assert!(matches!(
                req.validate(KNOWN_TOOLS),
                Err(ValidationError::InvalidValue { field, .. }) if field == "temperature"
            ));
        }
    }

    #[test]
    fn test_create_agent_optional_fields_may_be_omitted() {
        let req: CreateAgent = serde_json::from_value(json!({
            "name": "Minimal",
            "model": "command-r",
            "deployment": "Cohere Platform"
        }))
        .expect("minimal create request");
        assert!(req.tools.is_none());
        assert_eq!(req.validate(KNOWN_TOOLS), Ok(()));
    }

    #[test]
    fn test_update_agent_leaves_absent_fields() {
        let original = agent();
        let update = UpdateAgent {
            name: Some("Analyst".to_string()),
            temperature: Some(0.9),
            ..Default::default()
        };
        let updated = original.apply_update(&update, "2024-02-01T00:00:00Z");

        assert_eq!(updated.name, "Analyst");
        assert_eq!(updated.temperature, 0.9);
        assert_eq!(updated.preamble, original.preamble);
        assert_eq!(updated.tools, original.tools);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.updated_at, "2024-02-01T00:00:00Z");
        // Original untouched
        assert_eq!(original.name, "Researcher");
    }

    #[test]
    fn test_update_agent_validate_present_fields_only() {
        assert!(UpdateAgent::default().is_empty());
        assert_eq!(UpdateAgent::default().validate(KNOWN_TOOLS), Ok(()));

        let blank_model = UpdateAgent {
            model: Some(String::new()),
            ..Default::default()
        };
        assert!(!blank_model.is_empty());
        assert!(blank_model.validate(KNOWN_TOOLS).is_err());
    }

    #[test]
    fn test_tool_metadata_create_and_update() {
        let request = CreateAgentToolMetadata {
            id: None,
            tool_name: "read_document".to_string(),
            artifacts: vec![json!({ "folder": "reports" })
                .as_object()
                .cloned()
                .unwrap_or_default()],
        };
        let stored = request.into_metadata("tm1".to_string(), "u1", "a1", "2024-01-01T00:00:00Z");
        assert_eq!(stored.id, "tm1");
        assert_eq!(stored.agent_id, "a1");
        assert_eq!(stored.artifacts.len(), 1);

        let update = UpdateAgentToolMetadata {
            artifacts: Some(vec![]),
            ..Default::default()
        };
        let updated = stored.apply_update(&update, "2024-01-02T00:00:00Z");
        assert!(updated.artifacts.is_empty());
        assert_eq!(updated.tool_name, "read_document");
        assert_eq!(updated.updated_at.as_deref(), Some("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn test_tool_metadata_client_id_wins() {
        let request = CreateAgentToolMetadata {
            id: Some("client-id".to_string()),
            tool_name: "calculator".to_string(),
            artifacts: vec![],
        };
        let stored = request.into_metadata("generated".to_string(), "u1", "a1", "t0");
        assert_eq!(stored.id, "client-id");
    }

    #[test]
    fn test_create_agent_into_agent() {
        let stored = create_request().into_agent("a9", "u1", "2024-03-01T00:00:00Z", 0.3);

        assert_eq!(stored.id, "a9");
        assert_eq!(stored.user_id, "u1");
        assert_eq!(stored.version, 1);
        assert_eq!(stored.temperature, 0.3);
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(stored.tools, vec!["web_search".to_string()]);
        assert_eq!(stored.tools_metadata.len(), 1);
        let metadata = &stored.tools_metadata[0];
        assert_eq!(metadata.agent_id, "a9");
        assert_eq!(metadata.user_id, "u1");
        assert_eq!(metadata.tool_name, "web_search");
        assert_eq!(metadata.created_at.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert!(!metadata.id.is_empty());
    }

    #[test]
    fn test_create_agent_into_agent_defaults() {
        let req = CreateAgent {
            version: Some(4),
            temperature: None,
            tools: None,
            tools_metadata: None,
            ..create_request()
        };
        let stored = req.into_agent("a9", "u1", "t0", 0.3);
        assert_eq!(stored.version, 4);
        assert_eq!(stored.temperature, 0.3);
        assert!(stored.tools.is_empty());
        assert!(stored.tools_metadata.is_empty());
    }

    #[test]
    fn test_update_agent_carries_tool_metadata() {
        let update: UpdateAgent = serde_json::from_value(json!({
            "tools_metadata": [{ "id": null, "tool_name": "web_search", "artifacts": [] }]
        }))
        .expect("metadata update");
        assert!(!update.is_empty());
        assert_eq!(update.validate(KNOWN_TOOLS), Ok(()));

        let with_tools = UpdateAgent {
            tools: Some(vec!["calculator".to_string()]),
            ..update
        };
        assert!(matches!(
            with_tools.validate(KNOWN_TOOLS),
            Err(ValidationError::InvalidValue { field, .. }) if field == "tools_metadata"
        ));
    }

    #[test]
    fn test_update_agent_tool_metadata_keeps_existing_ids() {
        let stored = create_request().into_agent("a1", "u1", "2024-01-01T00:00:00Z", 0.3);
        let existing_id = stored.tools_metadata[0].id.clone();
        let artifact = json!({ "folder": "reports" })
            .as_object()
            .cloned()
            .unwrap_or_default();
        let update = UpdateAgent {
            tools: Some(vec!["web_search".to_string(), "calculator".to_string()]),
            tools_metadata: Some(vec![
                CreateAgentToolMetadata {
                    id: None,
                    tool_name: "calculator".to_string(),
                    artifacts: vec![],
                },
                CreateAgentToolMetadata {
                    id: None,
                    tool_name: "web_search".to_string(),
                    artifacts: vec![artifact],
                },
            ]),
            ..Default::default()
        };
        let updated = stored.apply_update(&update, "2024-02-01T00:00:00Z");

        let names: Vec<&str> = updated
            .tools_metadata
            .iter()
            .map(|m| m.tool_name.as_str())
            .collect();
        assert_eq!(names, vec!["calculator", "web_search"]);
        let search = updated.tool_metadata("web_search").expect("web_search metadata");
        assert_eq!(search.id, existing_id);
        assert_eq!(search.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(search.updated_at.as_deref(), Some("2024-02-01T00:00:00Z"));
        assert_eq!(search.artifacts.len(), 1);
        let calculator = updated.tool_metadata("calculator").expect("calculator metadata");
        assert_eq!(calculator.agent_id, "a1");
        assert_ne!(calculator.id, existing_id);
    }

    #[test]
    fn test_agent_tool_lookup() {
        let mut a = agent();
        a.tools_metadata.push(AgentToolMetadata {
            id: "tm1".to_string(),
            created_at: None,
            updated_at: None,
            user_id: "u1".to_string(),
            agent_id: "a1".to_string(),
            tool_name: "web_search".to_string(),
            artifacts: vec![],
        });
        assert!(a.has_tool("web_search"));
        assert!(!a.has_tool("calculator"));
        assert_eq!(a.tool_metadata("web_search").map(|m| m.id.as_str()), Some("tm1"));
    }

    #[test]
    fn test_delete_responses_are_empty_objects() {
        assert_eq!(serde_json::to_string(&DeleteAgent {}).expect("serialize"), "{}");
        assert_eq!(
            serde_json::to_string(&DeleteAgentToolMetadata {}).expect("serialize"),
            "{}"
        );
    }
}
