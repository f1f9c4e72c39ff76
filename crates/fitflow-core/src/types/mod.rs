//! Core types for FitFlow.

mod note;
mod profile;

pub use note::*;
pub use profile::*;

/// A JSON object as stored in, and returned by, the document store.
pub type Document = serde_json::Map<String, serde_json::Value>;
