// Wire-level tests for the HTTP provider clients against a mockito server.

use mockito::Matcher;
use serde_json::json;

use scaffold_gateway::errors::ProviderError;
use scaffold_gateway::providers::claude::ClaudeProvider;
use scaffold_gateway::providers::gemini::GeminiProvider;
use scaffold_gateway::providers::openai::OpenAIProvider;
use scaffold_gateway::providers::{CompletionOptions, LlmProvider, Message};

fn conversation() -> Vec<Message> {
    vec![
        Message::system("You are a code generator."),
        Message::user("build a counter"),
        Message::assistant("which framework?"),
        Message::user("react"),
    ]
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_gemini_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "systemInstruction": { "parts": [{ "text": "You are a code generator." }] },
            "contents": [
                { "role": "user", "parts": [{ "text": "build a counter" }] },
                { "role": "model", "parts": [{ "text": "which framework?" }] },
                { "role": "user", "parts": [{ "text": "react" }] }
            ],
            "generationConfig": { "maxOutputTokens": 8000 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{ "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url());
    let text = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "Hello world");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let provider = GeminiProvider::new("k".to_string())
        .unwrap()
        .with_base_url(server.url());
    let err = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, body, .. } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_missing_text_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let provider = GeminiProvider::new("k".to_string())
        .unwrap()
        .with_base_url(server.url());
    let err = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.reason(), "empty-response");
}

// ---------------------------------------------------------------------------
// OpenAI-compatible
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_openai_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "messages": [
                { "role": "system", "content": "You are a code generator." },
                { "role": "user", "content": "build a counter" },
                { "role": "assistant", "content": "which framework?" },
                { "role": "user", "content": "react" }
            ]
        })))
        .with_status(200)
        .with_body(
            json!({ "choices": [{ "message": { "role": "assistant", "content": "node" } }] })
                .to_string(),
        )
        .create_async()
        .await;

    let provider = OpenAIProvider::new_openai("sk-test".to_string())
        .unwrap()
        .with_base_url(server.url());
    let text = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "node");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ollama_sends_no_auth_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(json!({ "choices": [{ "message": { "content": "react" } }] }).to_string())
        .create_async()
        .await;

    let provider = OpenAIProvider::new_ollama(Some(server.url()), "qwen2.5-coder".to_string())
        .unwrap();
    let text = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "react");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_null_content_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(json!({ "choices": [{ "message": { "content": null } }] }).to_string())
        .create_async()
        .await;

    let provider = OpenAIProvider::new_groq("gsk".to_string())
        .unwrap()
        .with_base_url(server.url());
    let err = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.reason(), "empty-response");
}

// ---------------------------------------------------------------------------
// Claude
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_claude_success_lifts_system_prompt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "ant-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "system": "You are a code generator.",
            "max_tokens": 8000
        })))
        .with_status(200)
        .with_body(
            json!({ "content": [{ "type": "text", "text": "Adding a button." }] }).to_string(),
        )
        .create_async()
        .await;

    let provider = ClaudeProvider::new("ant-key".to_string())
        .unwrap()
        .with_base_url(server.url());
    let text = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "Adding a button.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_claude_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(401)
        .with_body(r#"{"error":{"message":"invalid x-api-key"}}"#)
        .create_async()
        .await;

    let provider = ClaudeProvider::new("bad".to_string())
        .unwrap()
        .with_base_url(server.url());
    let err = provider
        .complete(&conversation(), &CompletionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.reason(), "status");
    assert!(err.to_string().contains("401"));
}
