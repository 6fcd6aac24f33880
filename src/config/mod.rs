// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod provider;
mod settings;

pub use loader::{default_config_path, from_env, load_config, load_from_file};
pub use provider::ProviderEntry;
pub use settings::{Config, GenerationConfig, ServerConfig};
