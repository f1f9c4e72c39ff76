//! Document store implementations.

use crate::error::{StoreError, DOCUMENT_ALREADY_EXISTS};
use crate::query::{CollectionSpec, Filter, FindQuery, SIMILARITY_FIELD, VECTORIZE_FIELD};
use crate::Result;
use async_trait::async_trait;
use fitflow_core::Document;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Trait for collection-oriented JSON document stores.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a collection if it does not exist yet.
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()>;

    /// Insert a document, returning the id the store confirmed, if any.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Option<String>>;

    /// Get the first document matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    /// Get all documents matching a query.
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>>;

    /// Set top-level fields on the first document matching `filter`.
    /// Returns the number of matched documents.
    async fn update_one(&self, collection: &str, filter: &Filter, set: Document) -> Result<u64>;

    /// Delete the first document matching `filter`. Returns the number deleted.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64>;
}

/// In-memory document store.
///
/// Vector sorts are ranked by word overlap between the query and each
/// document's `$vectorize` text, standing in for the managed store's embeddings.
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

fn missing_collection(name: &str) -> StoreError {
    StoreError::command(format!("Collection does not exist: {}", name))
}

/// Strip store-internal fields the way the managed store does on reads.
fn public_view(document: &Document) -> Document {
    let mut view = document.clone();
    view.remove(VECTORIZE_FIELD);
    view
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(spec.name.clone()).or_default();
        Ok(())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<Option<String>> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        let id = match document.get("_id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        if docs
            .iter()
            .any(|d| d.get("_id").and_then(Value::as_str) == Some(id.as_str()))
        {
            return Err(StoreError::command_with_code(
                format!("Document already exists with the given _id: {}", id),
                DOCUMENT_ALREADY_EXISTS,
            ));
        }

        document.insert("_id".to_string(), Value::String(id.clone()));
        docs.push(document);
        Ok(Some(id))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?;

        Ok(docs.iter().find(|d| filter.matches(d)).map(public_view))
    }

    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?;

        let matching = docs.iter().filter(|d| query.filter.matches(d));

        let mut results: Vec<Document> = match &query.vectorize {
            Some(text) => {
                let mut scored: Vec<(f64, &Document)> = matching
                    .map(|d| {
                        let source = d.get(VECTORIZE_FIELD).and_then(Value::as_str).unwrap_or("");
                        (lexical_similarity(text, source), d)
                    })
                    .collect();

                // Sort by score descending
                scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

                scored
                    .into_iter()
                    .map(|(score, d)| {
                        let mut view = public_view(d);
                        if query.include_similarity {
                            view.insert(SIMILARITY_FIELD.to_string(), Value::from(score));
                        }
                        view
                    })
                    .collect()
            }
            None => matching.map(public_view).collect(),
        };

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn update_one(&self, collection: &str, filter: &Filter, set: Document) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        match docs.iter_mut().find(|d| filter.matches(d)) {
            Some(doc) => {
                for (key, value) in set {
                    doc.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Jaccard overlap of the lowercase word sets of `a` and `b`, in `[0, 1]`.
fn lexical_similarity(a: &str, b: &str) -> f64 {
    let words = |s: &str| -> HashSet<String> {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    };

    let a = words(a);
    let b = words(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}
