//! OpenAI-compatible provider contract tests.
//!
//! These tests verify the wire format `OpenAICompletion` sends to
//! `/chat/completions` and how provider responses are parsed or rejected.

use std::time::Duration;

use sentichat::llms::base_llm::{ChatMessage, ChatModel};
use sentichat::llms::providers::openai::OpenAICompletion;
use sentichat::ChatError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAICompletion {
    OpenAICompletion::new(
        "llama-3.1-8b-instant",
        "test-key",
        Some(format!("{}/openai/v1", server.uri())),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_model_messages_and_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi there"},
                {"role": "user", "content": "How are you?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Doing well.")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .complete(&[
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Hi there"),
            ChatMessage::user("How are you?"),
        ])
        .await
        .unwrap();
    assert_eq!(reply, "Doing well.");
}

#[tokio::test]
async fn test_temperature_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.25})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .with_temperature(0.25)
        .complete(&[ChatMessage::user("Hi")])
        .await
        .unwrap();
    assert_eq!(reply, "ok");
}

// ────────────────────────────────────────────────────────────────────────────
// Error mapping
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_auth_failure_is_model_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    match err {
        ChatError::Model(msg) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("Invalid API Key"));
        }
        other => panic!("expected Model error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_retry_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Model(_)));
}

#[tokio::test]
async fn test_body_without_content_is_model_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Model(msg) if msg.contains("No choices")));
}

#[tokio::test]
async fn test_non_json_body_is_model_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Model(msg) if msg.contains("Failed to parse")));
}
