// Scaffold Gateway - LLM gateway for an AI project scaffolder
// Library exports

pub mod artifact;
pub mod config;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod template;

pub use errors::{ClassificationError, GatewayError, ProviderError};
