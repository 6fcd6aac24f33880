// Scaffold Gateway - LLM gateway for an AI project scaffolder
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use scaffold_gateway::config::load_config;
use scaffold_gateway::prompts::PromptLibrary;
use scaffold_gateway::providers::create_provider;
use scaffold_gateway::server::{serve, AppState};

#[derive(Parser, Debug)]
#[command(name = "scaffold-gateway")]
#[command(about = "HTTP gateway that turns project descriptions into LLM-generated code")]
#[command(version)]
struct Args {
    /// Config file (defaults to $SCAFFOLD_CONFIG, then ~/.scaffold/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the bind address, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_deref().unwrap_or("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let library = PromptLibrary::load(config.prompts_dir.as_deref())
        .context("Failed to load prompt library")?;
    let provider = create_provider(&config.provider)?;

    let state = Arc::new(AppState::from_config(&config, provider, Arc::new(library)));
    serve(&config.server.bind_address, state).await
}
