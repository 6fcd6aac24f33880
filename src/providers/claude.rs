// Anthropic Claude API provider implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::{split_system, CompletionOptions, Message, Role};
use super::LlmProvider;
use crate::errors::ProviderError;

const CLAUDE_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Clone)]
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeProvider {
    pub fn new(api_key: String) -> Result<Self> {
        // No client-level timeout; the caller's deadline applies.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: CLAUDE_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn to_claude_request<'a>(
        &'a self,
        messages: &'a [Message],
        options: &CompletionOptions,
    ) -> ClaudeRequest<'a> {
        let (system, turns) = split_system(messages);
        ClaudeRequest {
            model: &self.model,
            max_tokens: options.max_tokens,
            system,
            messages: turns
                .iter()
                .map(|m| ClaudeMessage {
                    // The messages API only knows user/assistant turns.
                    role: match m.role {
                        Role::Assistant => "assistant",
                        Role::User | Role::System => "user",
                    },
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
            top_p: options.top_p,
        }
    }

    fn extract_text(&self, response: ClaudeResponse) -> Result<String, ProviderError> {
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: self.name().to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let request = self.to_claude_request(messages, options);
        let url = format!("{}/v1/messages", self.base_url);

        tracing::debug!(model = %self.model, turns = request.messages.len(), "Sending request to Claude API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: self.name().to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.name().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let claude_response: ClaudeResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                provider: self.name().to_string(),
                reason: e.to_string(),
            })?;

        self.extract_text(claude_response)
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ClaudeMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}
