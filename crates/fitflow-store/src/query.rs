//! Query building blocks shared by all store implementations.

use fitflow_core::config::VectorizeSettings;
use fitflow_core::Document;
use serde_json::{json, Value};

/// Name of the field the store embeds for similarity search.
pub const VECTORIZE_FIELD: &str = "$vectorize";

/// Name of the similarity score field on vector search results.
pub const SIMILARITY_FIELD: &str = "$similarity";

/// Equality filter over top-level document fields. All clauses must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Filter on `field == value`.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_equals(field, value)
    }

    /// Filter on the document id.
    pub fn id(id: impl Into<String>) -> Self {
        Self::equals("_id", id.into())
    }

    /// Add another equality clause.
    pub fn and_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// Render as a Data API filter, e.g. `{"user_id": {"$eq": "u1"}}`.
    pub fn to_json(&self) -> Value {
        let mut filter = Document::new();
        for (field, value) in &self.clauses {
            filter.insert(field.clone(), json!({ "$eq": value }));
        }
        Value::Object(filter)
    }

    /// Check whether a document satisfies every clause.
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Parameters for a `find` command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    /// Documents must match this filter.
    pub filter: Filter,

    /// Order by similarity to this text, most similar first.
    pub vectorize: Option<String>,

    /// Maximum number of documents to return.
    pub limit: Option<usize>,

    /// Attach `$similarity` to each result of a vector sort.
    pub include_similarity: bool,
}

impl FindQuery {
    /// Create a query with the given filter.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// Sort by similarity to `text`.
    pub fn sort_by_vectorize(mut self, text: impl Into<String>) -> Self {
        self.vectorize = Some(text.into());
        self
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request similarity scores.
    pub fn include_similarity(mut self) -> Self {
        self.include_similarity = true;
        self
    }
}

/// A collection to create on startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSpec {
    /// Collection name.
    pub name: String,

    /// Server-side embedding service, for collections searched by similarity.
    pub vectorize: Option<VectorizeSettings>,
}

impl CollectionSpec {
    /// A plain document collection.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vectorize: None,
        }
    }

    /// A collection with a vector index fed by `$vectorize`.
    pub fn vectorized(name: impl Into<String>, vectorize: VectorizeSettings) -> Self {
        Self {
            name: name.into(),
            vectorize: Some(vectorize),
        }
    }

    /// Data API `createCollection` options.
    pub fn options(&self) -> Option<Value> {
        self.vectorize.as_ref().map(|v| {
            json!({
                "vector": {
                    "metric": "cosine",
                    "service": {
                        "provider": v.provider,
                        "modelName": v.model,
                    }
                }
            })
        })
    }
}
