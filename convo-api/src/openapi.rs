//! OpenAPI Document for convo schemas
//!
//! Generated from the Rust types with utoipa so the Rust definitions are the
//! source of the schema. Only components are emitted; this crate serves no
//! routes.

use utoipa::OpenApi;

use convo_core::{
    Agent, AgentToolMetadata, Citation, CreateAgent, CreateAgentToolMetadata, DeleteAgent,
    DeleteAgentToolMetadata, Document, File, Message, MessageAgent, ToolCall, UpdateAgent,
    UpdateAgentToolMetadata,
};

use crate::error::{ErrorBody, ErrorCode};

/// OpenAPI document listing every wire schema.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "convo schemas",
        version = "0.1.0",
        description = "Wire schemas for chat transcripts and agent configuration",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    components(
        schemas(
            // Transcript
            Message,
            MessageAgent,
            Citation,
            Document,
            File,
            ToolCall,
            // Agents
            Agent,
            CreateAgent,
            UpdateAgent,
            DeleteAgent,
            AgentToolMetadata,
            CreateAgentToolMetadata,
            UpdateAgentToolMetadata,
            DeleteAgentToolMetadata,
            // Errors
            ErrorBody,
            ErrorCode,
        )
    ),
    tags(
        (name = "Messages", description = "Conversation transcript entries"),
        (name = "Agents", description = "Agent configuration and tool metadata")
    )
)]
pub struct ApiDoc;

/// Render the document as pretty JSON.
pub fn render_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
