//! Quechua Relay - Spanish ↔ Bolivian Quechua translation over a chat-completion API
//!
//! This library validates caller text, wraps it with a style contract and
//! forwards it to an OpenAI compatible endpoint, exposed as an HTTP API.

#![forbid(unsafe_code)]

pub mod core;
pub mod server;
pub mod cli;

// Re-export key types for convenience
pub use crate::core::{
    client::{ChatCompletionApi, GroqClient, Relay},
    config::{RelayConfig, ServerConfig},
    models::{TranslationRequest, TranslationResult, NO_RESPONSE_PLACEHOLDER},
    presets::{StyleContract, StylePreset},
    errors::RelayError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
