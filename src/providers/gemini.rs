// Google Gemini API provider implementation
//
// Gemini carries the system prompt in `systemInstruction` and calls the
// assistant role "model", so messages need a small conversion step.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::{split_system, CompletionOptions, Message, Role};
use super::LlmProvider;
use crate::errors::ProviderError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: String) -> Result<Self> {
        // No client-level timeout; the caller's deadline applies.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create with custom model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Convert the message list to Gemini's request format
    fn to_gemini_request(&self, messages: &[Message], options: &CompletionOptions) -> GeminiRequest {
        let (system, turns) = split_system(messages);

        let contents = turns
            .iter()
            .map(|msg| GeminiContent {
                // Gemini uses "model" instead of "assistant"; stray system
                // turns in the middle of a history are sent as user text.
                role: match msg.role {
                    Role::Assistant => "model".to_string(),
                    Role::User | Role::System => "user".to_string(),
                },
                parts: vec![GeminiPart {
                    text: Some(msg.content.clone()),
                }],
            })
            .collect();

        GeminiRequest {
            system_instruction: system.map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: Some(text.to_string()),
                }],
            }),
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: Some(options.max_tokens),
                top_p: options.top_p,
            },
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(&self, response: GeminiResponse) -> Result<String, ProviderError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: self.name().to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let request = self.to_gemini_request(messages, options);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(
            model = %self.model,
            turns = request.contents.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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

        let gemini_response: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                provider: self.name().to_string(),
                reason: e.to_string(),
            })?;

        let text = self.extract_text(gemini_response)?;
        tracing::debug!(chars = text.len(), "Received Gemini response");
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String, // "user" or "model"
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}
