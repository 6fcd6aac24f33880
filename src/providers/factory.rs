// Provider factory
//
// Creates the LLM provider selected in configuration

use anyhow::Result;
use std::sync::Arc;

use super::claude::ClaudeProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::LlmProvider;
use crate::config::ProviderEntry;

/// Create an `LlmProvider` from a `ProviderEntry`.
pub fn create_provider(entry: &ProviderEntry) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match entry {
        ProviderEntry::Gemini {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = GeminiProvider::new(api_key.clone())?;
            if let Some(m) = model {
                provider = provider.with_model(m.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            Arc::new(provider)
        }

        ProviderEntry::Openai {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = OpenAIProvider::new_openai(api_key.clone())?;
            if let Some(m) = model {
                provider = provider.with_model(m.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            Arc::new(provider)
        }

        ProviderEntry::Groq {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = OpenAIProvider::new_groq(api_key.clone())?;
            if let Some(m) = model {
                provider = provider.with_model(m.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            Arc::new(provider)
        }

        ProviderEntry::Claude {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = ClaudeProvider::new(api_key.clone())?;
            if let Some(m) = model {
                provider = provider.with_model(m.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            Arc::new(provider)
        }

        ProviderEntry::Ollama { model, base_url } => {
            Arc::new(OpenAIProvider::new_ollama(base_url.clone(), model.clone())?)
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        "Created {} provider",
        entry.display_name()
    );
    Ok(provider)
}
