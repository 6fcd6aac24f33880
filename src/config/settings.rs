// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{DEFAULT_BIND_ADDR, DEFAULT_MAX_TOKENS, DEFAULT_REQUEST_TIMEOUT_SECS};
use super::provider::ProviderEntry;
use crate::providers::CompletionOptions;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

/// Sampling options for generation calls (chat and conversation routes)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            top_p: None,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl GenerationConfig {
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Process-wide configuration, built once at start-up and injected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// The LLM backend used for every request
    pub provider: ProviderEntry,

    #[serde(default)]
    pub generation: GenerationConfig,

    /// Deadline for each individual provider call
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Directory with prompt overrides (system.md, base.md, react.md, node.md, ...)
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Create a config with defaults around the given provider
    pub fn with_provider(provider: ProviderEntry) -> Self {
        Self {
            server: ServerConfig::default(),
            provider,
            generation: GenerationConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            prompts_dir: None,
            log_level: None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.provider.api_key() {
            if key.trim().is_empty() {
                bail!("{} provider has an empty api_key", self.provider.display_name());
            }
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.generation.max_tokens == 0 {
            bail!("generation.max_tokens must be greater than zero");
        }
        if let Some(t) = self.generation.temperature {
            if !(0.0..=2.0).contains(&t) {
                bail!("generation.temperature must be within 0.0..=2.0, got {}", t);
            }
        }
        if let Some(p) = self.generation.top_p {
            if !(0.0..=1.0).contains(&p) {
                bail!("generation.top_p must be within 0.0..=1.0, got {}", p);
            }
        }
        Ok(())
    }
}
