//! Core data models for the relay

use serde::{Deserialize, Serialize};

/// Returned when the model produced no usable content
pub const NO_RESPONSE_PLACEHOLDER: &str = "(Sin respuesta de modelo)";

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Text must be non-empty after trimming
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
}

impl TranslationResult {
    /// Whether the placeholder was substituted for missing content
    pub fn is_placeholder(&self) -> bool {
        self.translation == NO_RESPONSE_PLACEHOLDER
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// OpenAI compatible chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Pull `choices[0].message.content` out of an upstream payload.
///
/// Anything missing, non-string or blank after trimming falls back to
/// [`NO_RESPONSE_PLACEHOLDER`].
pub fn extract_translation(json: &serde_json::Value) -> TranslationResult {
    let content = json["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let translation = match content {
        Some(text) => text.to_string(),
        None => NO_RESPONSE_PLACEHOLDER.to_string(),
    };

    TranslationResult { translation }
}
