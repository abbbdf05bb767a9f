//! Unit tests for the api module
//!
//! Tests cover:
//! - Messages API request/response wire shapes
//! - First-text-segment extraction
//! - Error body parsing

use smellhunt::api::types::{ErrorResponse, GenerateRequest, GenerateResponse, Message};
use smellhunt::api::ANTHROPIC_VERSION;

#[test]
fn test_anthropic_version_pin() {
    assert_eq!(ANTHROPIC_VERSION, "2023-06-01");
}

#[test]
fn test_request_wire_shape() {
    let request = GenerateRequest {
        model: "claude-3-5-sonnet-20240620".to_string(),
        max_tokens: 1000,
        messages: vec![Message::user("Create a bad code example for naming.")],
    };
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["model"], "claude-3-5-sonnet-20240620");
    assert_eq!(value["max_tokens"], 1000);
    let messages = value["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(
        messages[0]["content"],
        "Create a bad code example for naming."
    );
}

#[test]
fn test_response_first_text() {
    let json = r#"{
        "id": "msg_01",
        "model": "claude-3-5-sonnet-20240620",
        "content": [{"type": "text", "text": "def a(): pass"}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 20, "output_tokens": 9}
    }"#;
    let response: GenerateResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.first_text(), Some("def a(): pass"));
}

#[test]
fn test_response_without_text_blocks() {
    let json = r#"{"content": [{"type": "tool_use"}]}"#;
    let response: GenerateResponse = serde_json::from_str(json).unwrap();
    assert!(response.first_text().is_none());
}

#[test]
fn test_response_ignores_unknown_fields() {
    let json = r#"{
        "content": [{"type": "text", "text": "ok", "citations": []}],
        "some_future_field": {"nested": true}
    }"#;
    let response: GenerateResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.first_text(), Some("ok"));
}

#[test]
fn test_error_body_parsing() {
    let json = r#"{
        "type": "error",
        "error": {"type": "overloaded_error", "message": "Overloaded"}
    }"#;
    let err: ErrorResponse = serde_json::from_str(json).unwrap();
    assert_eq!(err.error.message, "Overloaded");
}

#[test]
fn test_malformed_response_is_an_error() {
    let result: Result<GenerateResponse, _> = serde_json::from_str("{ not json }");
    assert!(result.is_err());
}
