// Shared test fixtures: a scripted provider and a router built around it.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt; // provides .oneshot()

use scaffold_gateway::errors::ProviderError;
use scaffold_gateway::prompts::PromptLibrary;
use scaffold_gateway::providers::{CompletionOptions, LlmProvider, Message};
use scaffold_gateway::server::{create_router, AppState};

/// One canned provider answer
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Status(u16),
    /// Envelope answer naming the last message it was sent
    Echo,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

/// Provider that plays back queued replies in order and records every call.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Vec<Message>, CompletionOptions)>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(Vec<Message>, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), *options));

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Echo) => Ok(echo_envelope(
                messages.last().map_or("", |m| m.content.as_str()),
            )),
            Some(Reply::Status(status)) => Err(ProviderError::Status {
                provider: "scripted".to_string(),
                status,
                body: "scripted failure".to_string(),
            }),
            None => Err(ProviderError::EmptyResponse {
                provider: "scripted".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

/// Summary and artifact id both carry `request`.
pub fn echo_envelope(request: &str) -> String {
    format!(
        "Working on {request} right now.\n\n\
        <artifact id=\"{request}\" title=\"Echo\">\n\
        </artifact>"
    )
}

/// Router wired to `provider` with the built-in prompt library.
pub fn router_with(provider: Arc<dyn LlmProvider>) -> Router {
    let state = AppState::new(
        provider,
        Arc::new(PromptLibrary::default()),
        CompletionOptions::default(),
        Duration::from_secs(5),
    );
    create_router(Arc::new(state))
}

pub async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");

    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    (status, body_json(resp).await)
}

pub async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request");

    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    (status, body_json(resp).await)
}

/// Read an Axum response body as a parsed serde_json::Value.
pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}
