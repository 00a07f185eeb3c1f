//! Custom error types for relay operations

use thiserror::Error;

/// Relay-related errors
#[derive(Error, Debug)]
pub enum RelayError {
    /// No credential configured for the upstream API
    #[error("GROQ_API_KEY is not configured")]
    MissingApiKey,

    /// Caller text is absent or whitespace only
    #[error("Text to translate is empty")]
    EmptyText,

    /// Upstream answered with a non-success status
    #[error("Upstream error: {status} - {message}")]
    Upstream {
        status: u16,
        message: String,
    },

    /// Upstream could not be reached
    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    /// Upstream body was not JSON
    #[error("Invalid response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RelayError {
    /// Failures caused by talking to the upstream API
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RelayError::Upstream { .. } | RelayError::Network { .. } | RelayError::Http(_)
        )
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(err: anyhow::Error) -> Self {
        RelayError::Internal(err.to_string())
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
