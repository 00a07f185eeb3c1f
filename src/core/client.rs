//! Upstream client and the translation relay

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::core::config::RelayConfig;
use crate::core::errors::{RelayError, Result};
use crate::core::models::{
    extract_translation, ChatCompletionRequest, ChatMessage, TranslationRequest, TranslationResult,
};

/// Outbound chat-completion API
#[async_trait]
pub trait ChatCompletionApi: Send + Sync {
    /// Send one request and return the raw JSON payload of a successful answer
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<serde_json::Value>;
}

/// Groq (OpenAI compatible) HTTP client
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GroqClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10);

        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.api_endpoint.clone(),
        })
    }
}

#[async_trait]
impl ChatCompletionApi for GroqClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();
            error!("Error Groq ({}): {}", status_code, error_text);

            return Err(RelayError::Upstream {
                status: status_code,
                message: error_text,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RelayError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

/// Stateless relay: validates, forwards to the upstream, extracts the answer
#[derive(Clone)]
pub struct Relay {
    api: Arc<dyn ChatCompletionApi>,
    config: Arc<RelayConfig>,
}

impl Relay {
    /// Create a relay over any upstream implementation
    pub fn new(config: RelayConfig, api: Arc<dyn ChatCompletionApi>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }

    /// Create a relay talking to Groq over HTTP
    pub fn with_groq(config: RelayConfig) -> Result<Self> {
        let api = Arc::new(GroqClient::new(&config)?);
        Self::new(config, api)
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = RelayConfig::from_env()?;
        Self::with_groq(config)
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Build the outbound body for a caller text
    pub fn build_request(&self, text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.style.instructions()),
                ChatMessage::user(text),
            ],
            temperature: self.config.temperature,
        }
    }

    /// Translate a single request
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        if request.is_blank() {
            return Err(RelayError::EmptyText);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RelayError::MissingApiKey)?;

        let body = self.build_request(&request.text);
        debug!(
            "Forwarding {} chars to {} (style '{}')",
            request.text.len(),
            self.config.model,
            self.config.style.name()
        );

        let json = self.api.complete(api_key, &body).await?;
        let result = extract_translation(&json);

        if result.is_placeholder() {
            debug!("Upstream answer had no usable content: {}", json);
        }

        Ok(result)
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("model", &self.config.model)
            .field("style", &self.config.style.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Role, NO_RESPONSE_PLACEHOLDER};
    use crate::core::presets::{StyleContract, StylePreset};
    use serde_json::json;
    use std::sync::Mutex;

    /// Upstream spy returning a canned outcome
    struct SpyApi {
        reply: Box<dyn Fn() -> Result<serde_json::Value> + Send + Sync>,
        calls: Mutex<Vec<(String, ChatCompletionRequest)>>,
    }

    impl SpyApi {
        fn replying(value: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Box::new(move || Ok(value.clone())),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Box::new(move || {
                    Err(RelayError::Upstream {
                        status,
                        message: "{\"error\":\"rate_limited\"}".to_string(),
                    })
                }),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatCompletionApi for SpyApi {
        async fn complete(
            &self,
            api_key: &str,
            request: &ChatCompletionRequest,
        ) -> Result<serde_json::Value> {
            self.calls
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            (self.reply)()
        }
    }

    fn answer(content: &str) -> serde_json::Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
    }

    fn relay_with(spy: Arc<SpyApi>, api_key: Option<&str>) -> Relay {
        let mut config = RelayConfig::default();
        config.api_key = api_key.map(str::to_string);
        Relay::new(config, spy).unwrap()
    }

    #[tokio::test]
    async fn test_successful_translation_is_trimmed() {
        let spy = SpyApi::replying(answer("  Allin p'unchay, wawqey  "));
        let relay = relay_with(spy.clone(), Some("gsk_test"));

        let result = relay
            .translate(&TranslationRequest::new("Buenos días, hermano"))
            .await
            .unwrap();

        assert_eq!(result.translation, "Allin p'unchay, wawqey");
        assert_eq!(spy.call_count(), 1);
    }

    #[tokio::test]
    async fn test_outbound_request_shape() {
        let spy = SpyApi::replying(answer("Sulpayki"));
        let mut config = RelayConfig::default()
            .with_api_key("gsk_test")
            .with_style(StyleContract::preset(StylePreset::Literal));
        config.model = "llama-3.3-70b-versatile".to_string();
        let relay = Relay::new(config, spy.clone()).unwrap();

        relay.translate(&TranslationRequest::new("Gracias")).await.unwrap();

        let calls = spy.calls.lock().unwrap();
        let (key, request) = &calls[0];
        assert_eq!(key, "gsk_test");
        assert_eq!(request.model, "llama-3.3-70b-versatile");
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, StylePreset::Literal.prompt());
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Gracias");
    }

    #[tokio::test]
    async fn test_blank_text_never_calls_upstream() {
        let spy = SpyApi::replying(answer("unused"));
        let relay = relay_with(spy.clone(), Some("gsk_test"));

        for text in ["", "   ", "\n\t"] {
            let err = relay.translate(&TranslationRequest::new(text)).await.unwrap_err();
            assert!(matches!(err, RelayError::EmptyText));
        }
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_upstream() {
        let spy = SpyApi::replying(answer("unused"));
        let relay = relay_with(spy.clone(), None);

        let err = relay.translate(&TranslationRequest::new("hola")).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingApiKey));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_text_checked_before_key() {
        let spy = SpyApi::replying(answer("unused"));
        let relay = relay_with(spy.clone(), None);

        let err = relay.translate(&TranslationRequest::new("  ")).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyText));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let spy = SpyApi::failing(429);
        let relay = relay_with(spy.clone(), Some("gsk_test"));

        let err = relay.translate(&TranslationRequest::new("hola")).await.unwrap_err();
        assert!(err.is_upstream());
        assert_eq!(spy.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_choices_yield_placeholder() {
        let spy = SpyApi::replying(json!({ "choices": [] }));
        let relay = relay_with(spy, Some("gsk_test"));

        let result = relay.translate(&TranslationRequest::new("hola")).await.unwrap();
        assert_eq!(result.translation, NO_RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RelayConfig {
            model: String::new(),
            ..Default::default()
        };

        assert!(Relay::with_groq(config).is_err());
    }
}
