//! Error types for Lafia Chat core

use thiserror::Error;

/// Main error type for Lafia Chat operations
#[derive(Debug, Error)]
pub enum LafiaError {
    /// Message was empty after trimming; callers drop it silently
    #[error("Empty input")]
    EmptyInput,

    /// Transport failure or a non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type using LafiaError
pub type Result<T> = std::result::Result<T, LafiaError>;

impl LafiaError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        LafiaError::Network(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        LafiaError::MalformedResponse(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        LafiaError::Config(msg.into())
    }

    /// Short, stable label used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            LafiaError::EmptyInput => "empty_input",
            LafiaError::Network(_) => "network",
            LafiaError::MalformedResponse(_) => "malformed_response",
            LafiaError::Config(_) => "config",
            LafiaError::Serialization(_) => "serialization",
            LafiaError::Io(_) => "io",
        }
    }
}

impl From<reqwest::Error> for LafiaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LafiaError::MalformedResponse(err.to_string())
        } else {
            LafiaError::Network(err.without_url().to_string())
        }
    }
}
