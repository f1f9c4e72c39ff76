//! Document storage for FitFlow.
//!
//! This crate provides:
//! - A [`DocumentStore`] seam over a collection-oriented JSON document API
//! - [`DataApiClient`], the HTTP client for the managed store
//! - [`MemoryDocumentStore`] for local development and tests
//! - [`FitnessRepository`], profile and note operations on top of either

pub mod data_api;
pub mod error;
pub mod query;
pub mod repository;
pub mod store;

pub use data_api::DataApiClient;
pub use error::StoreError;
pub use query::{CollectionSpec, Filter, FindQuery};
pub use repository::{FitnessRepository, NOTES_COLLECTION, PROFILES_COLLECTION};
pub use store::{DocumentStore, MemoryDocumentStore};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
