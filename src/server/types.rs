// HTTP request/response bodies
//
// Field names follow the front end's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::prompts::FileNode;
use crate::providers::Message;

/// Body of every non-success response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub msg: String,
}

/// `POST /template`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRequest {
    /// Free-text project description
    pub prompt: String,
}

/// `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// Treat the request as a change to an existing project
    #[serde(default)]
    pub is_follow_up: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /chat-conversation`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub current_files: Option<Vec<FileNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    /// Full artifact-bearing model text
    pub response: String,
    /// Human-readable summary of the change
    pub conversational_message: String,
    /// The envelope came from the corrective re-prompt
    pub was_forced: bool,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}
