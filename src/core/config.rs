//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::presets::{StyleContract, StylePreset};

/// Default Groq chat-completion endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Low temperature keeps output literal
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Configuration for the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bearer credential; `None` fails each request, not start-up
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// Outbound timeout; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
    pub style: StyleContract,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: None,
            style: StyleContract::default(),
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_endpoint = std::env::var("GROQ_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = match std::env::var("GROQ_TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>()?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let timeout_ms = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => Some(raw.parse::<u64>()?),
            Err(_) => None,
        };

        let style = match std::env::var("STYLE_CONTRACT_FILE") {
            Ok(path) => StyleContract::from_file(&path)?,
            Err(_) => {
                let preset = match std::env::var("STYLE_PRESET") {
                    Ok(raw) => raw.parse::<StylePreset>()?,
                    Err(_) => StylePreset::default(),
                };
                StyleContract::preset(preset)
            }
        };

        let config = Self {
            api_key,
            api_endpoint,
            model,
            temperature,
            timeout_ms,
            style,
        };

        if config.api_key.is_none() {
            warn!("GROQ_API_KEY is not set; translation requests will fail");
        }
        info!("Using model {} with style '{}'", config.model, config.style.name());

        Ok(config)
    }

    /// Replace the credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the style contract
    pub fn with_style(mut self, style: StyleContract) -> Self {
        self.style = style;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model identifier is required"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be within 0 and 2"));
        }

        if self.style.instructions().trim().is_empty() {
            return Err(anyhow::anyhow!("style contract is empty"));
        }

        Ok(())
    }
}

/// Listener configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Served for non-API paths when the directory exists
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some(PathBuf::from("public")),
        }
    }
}

impl ServerConfig {
    /// Load listener settings from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => defaults.port,
        };

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .ok()
            .or(defaults.static_dir);

        Ok(Self {
            host,
            port,
            static_dir,
        })
    }
}
