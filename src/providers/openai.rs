// OpenAI API provider implementation
//
// This provider works for OpenAI, Groq and a local Ollama daemon since they
// all speak the chat completions format.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::{CompletionOptions, Message};
use super::LlmProvider;
use crate::errors::ProviderError;


/// OpenAI-compatible chat completions provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    provider_name: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new_openai(api_key: String) -> Result<Self> {
        Self::new(
            Some(api_key),
            "https://api.openai.com".to_string(),
            "gpt-4o".to_string(),
            "openai".to_string(),
        )
    }

    /// Create a new Groq provider (fast inference, uses OpenAI-compatible API)
    pub fn new_groq(api_key: String) -> Result<Self> {
        Self::new(
            Some(api_key),
            "https://api.groq.com/openai".to_string(),
            "llama-3.3-70b-versatile".to_string(),
            "groq".to_string(),
        )
    }

    /// Create a provider for a local Ollama daemon (no API key)
    pub fn new_ollama(base_url: Option<String>, model: String) -> Result<Self> {
        Self::new(
            None,
            base_url.unwrap_or_else(|| "http://localhost:11434".to_string()),
            model,
            "ollama".to_string(),
        )
    }

    /// Set custom model for this provider
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn new(
        api_key: Option<String>,
        base_url: String,
        model: String,
        provider_name: String,
    ) -> Result<Self> {
        // No client-level timeout; the caller's deadline applies.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            provider_name,
        })
    }

    fn to_openai_request<'a>(
        &'a self,
        messages: &'a [Message],
        options: &CompletionOptions,
    ) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: Some(options.max_tokens),
            temperature: options.temperature,
            top_p: options.top_p,
        }
    }

    fn extract_text(&self, response: OpenAIResponse) -> Result<String, ProviderError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse {
                provider: self.provider_name.clone(),
            })
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let request = self.to_openai_request(messages, options);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(
            provider = %self.provider_name,
            model = %self.model,
            messages = messages.len(),
            "Sending request to chat completions API"
        );

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: self.provider_name.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.provider_name.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let openai_response: OpenAIResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                provider: self.provider_name.clone(),
                reason: e.to_string(),
            })?;

        let text = self.extract_text(openai_response)?;
        tracing::debug!(chars = text.len(), "Received chat completions response");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}
