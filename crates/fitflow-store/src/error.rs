//! Store error types.

use fitflow_core::ConfigError;
use thiserror::Error;

/// Error code for an insert whose `_id` is already taken.
pub const DOCUMENT_ALREADY_EXISTS: &str = "DOCUMENT_ALREADY_EXISTS";

/// Error code for `createCollection` on a name that is already in use.
pub const EXISTING_COLLECTION_DIFFERENT_SETTINGS: &str = "EXISTING_COLLECTION_DIFFERENT_SETTINGS";

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status from the store.
    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The store rejected a command.
    #[error("Store command failed: {0}")]
    Command(String),

    /// A write was not confirmed by the store.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Create a command error.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }

    /// Create a command error tagged with a Data API error code.
    pub fn command_with_code(message: impl AsRef<str>, code: &str) -> Self {
        Self::Command(format!("{} ({})", message.as_ref(), code))
    }

    /// Whether this is a command error carrying the given error code.
    pub fn has_code(&self, code: &str) -> bool {
        match self {
            Self::Command(message) => message.contains(&format!("({})", code)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_code() {
        let err = StoreError::command_with_code("Document already exists", DOCUMENT_ALREADY_EXISTS);
        assert!(err.has_code(DOCUMENT_ALREADY_EXISTS));
        assert!(!err.has_code(EXISTING_COLLECTION_DIFFERENT_SETTINGS));
        assert!(!StoreError::command("DOCUMENT_ALREADY_EXISTS").has_code(DOCUMENT_ALREADY_EXISTS));
        assert!(!StoreError::persistence("x").has_code(DOCUMENT_ALREADY_EXISTS));
    }
}
