//! Request and response types for the chat-completions wire format.
//!
//! The shapes follow the OpenAI-compatible API that Groq serves: requests
//! carry `model`, `messages`, `max_tokens` and an optional `temperature`;
//! responses carry a `choices` list whose entries wrap an assistant message.

use serde::{Deserialize, Serialize};

/// Message role in a chat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Outbound chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Inbound chat-completions response body.
///
/// Only the fields this service consumes are modeled; the upstream sends
/// more (usage counters, ids) and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// One completion candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

/// The generated message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub content: String,
}

/// A fully rendered prompt, ready for [`complete`](super::CompletionClient::complete).
///
/// This is the narrow seam between the coaching pipelines and the wire
/// format: callers hand over finished text plus a token budget and never see
/// request serialization or transport concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionPrompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl CompletionPrompt {
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens,
            temperature: None,
        }
    }

    /// Override the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![
                ChatMessage::system("You are a helpful AI study coach."),
                ChatMessage::user("How do I focus?"),
            ],
            max_tokens: 500,
            temperature: None,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "How do I focus?");
        // temperature is omitted entirely when unset
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_chat_request_serializes_temperature_when_set() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 100,
            temperature: Some(0.2),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_chat_response_deserialization() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "1. Silence notifications."},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 42, "completion_tokens": 12}
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content,
            "1. Silence notifications."
        );
    }

    #[test]
    fn test_chat_response_with_empty_choices() {
        let body = r#"{"choices": []}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_completion_prompt_builder() {
        let prompt = CompletionPrompt::new("system text", "user text", 500).with_temperature(0.7);

        assert_eq!(prompt.system, "system text");
        assert_eq!(prompt.user, "user text");
        assert_eq!(prompt.max_tokens, 500);
        assert_eq!(prompt.temperature, Some(0.7));
    }

    #[test]
    fn test_role_serde_representation() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
