// Configuration loader
// Loads settings from a TOML file or, failing that, from environment variables

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::CONFIG_ENV_VAR;
use super::provider::ProviderEntry;
use super::settings::Config;

/// Load configuration.
///
/// Search order: the explicit `path` (from `--config`), `$SCAFFOLD_CONFIG`,
/// `~/.scaffold/config.toml`, then provider API keys in the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_from_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if !env_path.is_empty() {
            return load_from_file(Path::new(&env_path));
        }
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            return load_from_file(&default_path);
        }
    }

    if let Some(config) = from_env(|key| std::env::var(key).ok())? {
        return Ok(config);
    }

    bail!(
        "No configuration found. Either create ~/.scaffold/config.toml:\n\n\
        [provider]\n\
        type = \"gemini\"\n\
        api_key = \"...\"\n\n\
        or set one of GEMINI_API_KEY, OPENAI_API_KEY, ANTHROPIC_API_KEY."
    );
}

/// `~/.scaffold/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".scaffold").join("config.toml"))
}

/// Parse and validate a TOML config file.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::debug!(path = %path.display(), provider = config.provider.display_name(), "Loaded config file");
    Ok(config)
}

/// Build a config from environment variables.
///
/// The first API key found wins: `GEMINI_API_KEY`, `OPENAI_API_KEY`,
/// `ANTHROPIC_API_KEY`. `PORT` overrides the listen port and
/// `REQUEST_TIMEOUT_SECS` the provider deadline. Returns `Ok(None)` when no
/// key is set.
pub fn from_env<F>(lookup: F) -> Result<Option<Config>>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let provider = if let Some(api_key) = non_empty("GEMINI_API_KEY") {
        ProviderEntry::Gemini {
            api_key,
            model: non_empty("GEMINI_MODEL"),
            base_url: None,
        }
    } else if let Some(api_key) = non_empty("OPENAI_API_KEY") {
        ProviderEntry::Openai {
            api_key,
            model: non_empty("OPENAI_MODEL"),
            base_url: None,
        }
    } else if let Some(api_key) = non_empty("ANTHROPIC_API_KEY") {
        ProviderEntry::Claude {
            api_key,
            model: non_empty("ANTHROPIC_MODEL"),
            base_url: None,
        }
    } else {
        return Ok(None);
    };

    let mut config = Config::with_provider(provider);

    if let Some(port) = non_empty("PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("PORT is not a valid port number: {}", port))?;
        config.server.bind_address = format!("0.0.0.0:{}", port);
    }

    if let Some(secs) = non_empty("REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = secs
            .trim()
            .parse()
            .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {}", secs))?;
    }

    config.validate().context("Configuration validation failed")?;
    Ok(Some(config))
}
