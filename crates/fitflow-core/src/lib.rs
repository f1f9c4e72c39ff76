//! # fitflow-core
//!
//! Core types, configuration, and utilities for FitFlow.
//!
//! This crate provides shared functionality used across all FitFlow crates:
//!
//! - **Configuration**: Settings for the HTTP server, the flow engine and the document store
//! - **Types**: Profiles, notes, and profile updates
//! - **Utilities**: Environment handling and secret strings

pub mod config;
pub mod env;
pub mod error;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::ServiceConfig;
pub use error::{ConfigError, Result};
pub use secret::SecretString;
pub use types::*;
