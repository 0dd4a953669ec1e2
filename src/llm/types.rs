//! LLM communication types
//!
//! This module defines the types used for LLM request/response communication,
//! independent of any specific provider implementation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions
    System,
    /// User message
    User,
    /// Assistant (LLM) response
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to send to the LLM
#[derive(Debug, Clone)]
pub struct LLMRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation (0.0 - 1.0)
    pub temperature: Option<f32>,
}

impl LLMRequest {
    /// Creates a new request with messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    /// Sets the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns the content of the first message with the given role
    pub fn message_content(&self, role: MessageRole) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Text content of the response
    pub content: String,
    /// Time taken for the request
    pub response_time: Duration,
}

impl LLMResponse {
    /// Creates a new response with just content
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            response_time,
        }
    }

    /// True when the model produced nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_creation() {
        let system = ChatMessage::system("You are a CI/CD architect");
        assert_eq!(system.role, MessageRole::System);
        assert_eq!(system.content, "You are a CI/CD architect");

        let user = ChatMessage::user("Analyze this");
        assert_eq!(user.role, MessageRole::User);

        let assistant = ChatMessage::assistant("{}");
        assert_eq!(assistant.role, MessageRole::Assistant);
    }

    #[test]
    fn test_llm_request_builder() {
        let request = LLMRequest::new(vec![ChatMessage::user("Hello")])
            .with_temperature(0.1);

        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_message_content_lookup() {
        let request = LLMRequest::new(vec![
            ChatMessage::system("rules"),
            ChatMessage::user("payload"),
        ]);

        assert_eq!(request.message_content(MessageRole::System), Some("rules"));
        assert_eq!(request.message_content(MessageRole::User), Some("payload"));
        assert_eq!(request.message_content(MessageRole::Assistant), None);
    }

    #[test]
    fn test_blank_response() {
        assert!(LLMResponse::text("  \n\t", Duration::from_millis(5)).is_blank());
        assert!(!LLMResponse::text("{}", Duration::from_millis(5)).is_blank());
    }
}
