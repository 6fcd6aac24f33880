// Gateway HTTP server
//
// Stateless between requests: every handler reads the shared, immutable
// `AppState` and owns its per-request prompt messages.

mod handlers;
pub mod types;

pub use handlers::{handle_chat, handle_chat_conversation, handle_template, health_check};

use anyhow::Result;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::artifact::ArtifactProtocol;
use crate::config::constants::MAX_BODY_BYTES;
use crate::config::Config;
use crate::prompts::{PromptComposer, PromptLibrary};
use crate::providers::{CompletionOptions, LlmProvider};
use crate::template::TemplateClassifier;

/// Shared state handed to every route
pub struct AppState {
    provider: Arc<dyn LlmProvider>,
    composer: PromptComposer,
    classifier: TemplateClassifier,
    protocol: ArtifactProtocol,
    /// Options for `/chat` and `/chat-conversation`
    generation: CompletionOptions,
    /// Deadline for each provider call
    timeout: Duration,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        library: Arc<PromptLibrary>,
        generation: CompletionOptions,
        timeout: Duration,
    ) -> Self {
        let composer = PromptComposer::new(library);
        let classifier = TemplateClassifier::new(Arc::clone(&provider), composer.clone(), timeout);
        let protocol = ArtifactProtocol::new(
            Arc::clone(&provider),
            composer.clone(),
            generation,
            timeout,
        );

        Self {
            provider,
            composer,
            classifier,
            protocol,
            generation,
            timeout,
        }
    }

    /// Build state from the loaded configuration
    pub fn from_config(
        config: &Config,
        provider: Arc<dyn LlmProvider>,
        library: Arc<PromptLibrary>,
    ) -> Self {
        Self::new(
            provider,
            library,
            config.generation.options(),
            config.request_timeout(),
        )
    }
}

/// Create the router with every route and middleware layer attached
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/template", post(handle_template))
        .route("/chat", post(handle_chat))
        .route("/chat-conversation", post(handle_chat_conversation))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}

/// Bind and serve until ctrl-c
pub async fn serve(bind_address: &str, state: Arc<AppState>) -> Result<()> {
    let addr: SocketAddr = bind_address.parse()?;
    let app = create_router(Arc::clone(&state));

    tracing::info!(
        provider = state.provider.name(),
        model = state.provider.model(),
        "Starting scaffold gateway on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
