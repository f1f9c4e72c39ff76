//! HTTP API server for FitFlow.
//!
//! This crate provides:
//! - JSON endpoints for coaching advice, macro plans, profiles and notes
//! - Retrieval of similar notes as extra context for workout advice
//! - CORS and request tracing layers, graceful shutdown

pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;
pub mod state;
pub mod summary;

pub use error::{ApiError, GatewayError};
pub use server::{Server, ServerConfig};
pub use state::AppState;
pub use summary::profile_summary;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
