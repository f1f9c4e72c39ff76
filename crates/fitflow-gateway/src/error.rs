//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fitflow_core::ConfigError;
use fitflow_flows::FlowError;
use fitflow_store::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Bind or accept failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid server settings.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors returned by request handlers. Rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, missing field, or blank required value.
    #[error("{0}")]
    BadRequest(String),

    /// A flow call failed.
    #[error("{context}: {source}")]
    Generation {
        context: &'static str,
        #[source]
        source: FlowError,
    },

    /// A store call failed.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Wrap a flow error with the failed operation.
    pub fn generation(context: &'static str) -> impl FnOnce(FlowError) -> Self {
        move |source| Self::Generation { context, source }
    }

    /// Wrap a store error with the failed operation.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { context, source }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Generation { source, .. } if source.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check that a required string field is present and not blank.
    pub fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, Self> {
        if value.trim().is_empty() {
            return Err(Self::bad_request(format!("{} is required", field)));
        }
        Ok(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
