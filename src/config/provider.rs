// Provider entry: which LLM backend the gateway talks to

use serde::{Deserialize, Serialize};

/// A single provider entry.
///
/// Serializes with a `type` tag, e.g.:
/// ```toml
/// [provider]
/// type = "gemini"
/// api_key = "AIza..."
/// model = "gemini-2.0-flash"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderEntry {
    Gemini {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Openai {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Groq {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Claude {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Ollama {
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl ProviderEntry {
    /// Human-readable name for logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "Gemini",
            Self::Openai { .. } => "OpenAI",
            Self::Groq { .. } => "Groq",
            Self::Claude { .. } => "Claude",
            Self::Ollama { .. } => "Ollama",
        }
    }

    /// API key, if this backend needs one.
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::Gemini { api_key, .. }
            | Self::Openai { api_key, .. }
            | Self::Groq { api_key, .. }
            | Self::Claude { api_key, .. } => Some(api_key),
            Self::Ollama { .. } => None,
        }
    }
}
