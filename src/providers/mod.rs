// Multi-provider LLM support
//
// This module provides an abstraction layer over different LLM providers
// (Gemini, OpenAI-compatible endpoints, Claude) so the rest of the gateway
// never sees a provider-specific response shape.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::ProviderError;

pub mod types;

// Provider implementations
pub mod claude;
pub mod gemini;
pub mod openai;

// Provider factory
pub mod factory;

pub use factory::create_provider;
pub use types::{CompletionOptions, Message, Role};

/// Trait for LLM providers
///
/// All backends implement this trait. Implementations differ only in
/// endpoint, authentication header shape and response unwrapping. No
/// retries happen at this layer.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the ordered message list and return the generated text.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;

    /// Get the provider name (e.g., "gemini", "openai", "claude")
    fn name(&self) -> &str;

    /// Get the model this provider sends requests to
    fn model(&self) -> &str;
}

/// Run a completion under a deadline.
///
/// Dropping the returned future (for example when the inbound HTTP request is
/// cancelled) also drops the in-flight provider call.
pub async fn complete_with_timeout(
    provider: &dyn LlmProvider,
    messages: &[Message],
    options: &CompletionOptions,
    timeout: Duration,
) -> Result<String, ProviderError> {
    match tokio::time::timeout(timeout, provider.complete(messages, options)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            provider: provider.name().to_string(),
            secs: timeout.as_secs(),
        }),
    }
}
