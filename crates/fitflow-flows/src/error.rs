//! Error types for flow calls.

use fitflow_core::ConfigError;
use thiserror::Error;

/// Result type for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Flow error types.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Missing or invalid configuration (API key, base URL).
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Network failure, timeout, or non-success HTTP status from the flow engine.
    #[error("Flow engine error: {}", describe_upstream(.status, .message))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The flow engine answered, but not in any shape we know how to read.
    #[error("Could not extract text from flow response: {0}")]
    UpstreamFormat(String),
}

fn describe_upstream(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP {} - {}", status, message),
        None => message.to_string(),
    }
}

impl FlowError {
    /// Create an upstream error with an HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an upstream error for a transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::UpstreamFormat(message.into())
    }

    /// Whether the flow engine rejected the request itself (HTTP 4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Upstream { status: Some(s), .. } if (400..500).contains(s))
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::transport(format!("request timed out: {}", e));
        }
        match e.status() {
            Some(status) => Self::status(status.as_u16(), e.to_string()),
            None => Self::transport(e.to_string()),
        }
    }
}
