// Route handlers
//
// Each handler maps one JSON request onto the composer, classifier or
// artifact protocol and shapes the JSON response. All failures go through
// `GatewayError`, so callers always get a `{msg}` body.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use super::types::{
    ChatRequest, ChatResponse, ConversationRequest, ConversationResponse, HealthResponse,
    TemplateRequest,
};
use super::AppState;
use crate::errors::GatewayError;
use crate::prompts::composer::latest_user_message;
use crate::providers::complete_with_timeout;
use crate::template::TemplateBundle;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))
}

/// `POST /template`
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_template(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TemplateRequest>, JsonRejection>,
) -> Result<Json<TemplateBundle>, GatewayError> {
    let request = body(payload)?;
    let bundle = state.classifier.bundle_for(&request.prompt).await?;
    tracing::info!(prompts = bundle.prompts.len(), "Template resolved");
    Ok(Json(bundle))
}

/// `POST /chat`
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let request = body(payload)?;
    let follow_up = request.is_follow_up.unwrap_or(false);

    let messages = if follow_up {
        state.composer.follow_up(&request.messages)
    } else {
        state.composer.chat(&request.messages)
    };

    let answer = complete_with_timeout(
        state.provider.as_ref(),
        &messages,
        &state.generation,
        state.timeout,
    )
    .await?;

    tracing::info!(
        follow_up,
        history = request.messages.len(),
        chars = answer.len(),
        "Chat completed"
    );
    Ok(Json(ChatResponse {
        response: answer.trim().to_string(),
    }))
}

/// `POST /chat-conversation`
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_chat_conversation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationResponse>, GatewayError> {
    let request = body(payload)?;
    let user_request = latest_user_message(&request.messages).ok_or_else(|| {
        GatewayError::InvalidRequest("messages must contain at least one user message".to_string())
    })?;
    let files = request.current_files.as_deref().unwrap_or(&[]);

    let result = state.protocol.generate(user_request, files).await?;

    match result.envelope() {
        Some(envelope) => {
            let absolute = envelope.absolute_paths();
            if !absolute.is_empty() {
                tracing::warn!(paths = ?absolute, "Envelope uses absolute file paths");
            }
            tracing::info!(
                forced = result.was_forced,
                actions = envelope.actions.len(),
                artifact_id = envelope.id.as_deref().unwrap_or("-"),
                "Conversation completed"
            );
        }
        None => tracing::info!(forced = result.was_forced, "Conversation completed without envelope"),
    }

    Ok(Json(ConversationResponse {
        response: result.artifact_text,
        conversational_message: result.conversational_summary,
        was_forced: result.was_forced,
    }))
}

/// `GET /health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.provider.name().to_string(),
        model: state.provider.model().to_string(),
    })
}
