//! HTTP client for the managed document store's JSON Data API.
//!
//! Every command is a `POST` of a single-key JSON object (`{"findOne": {...}}`)
//! to `{endpoint}/api/json/v1/{keyspace}/{collection}`, authenticated with a
//! `Token` header. Command-level failures come back as HTTP 200 with an
//! `errors` array, so both the status and the body are checked.

use crate::error::{StoreError, EXISTING_COLLECTION_DIFFERENT_SETTINGS};
use crate::query::{CollectionSpec, Filter, FindQuery, VECTORIZE_FIELD};
use crate::store::DocumentStore;
use crate::Result;
use async_trait::async_trait;
use fitflow_core::config::StoreSettings;
use fitflow_core::{Document, SecretString};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request timeout for store commands.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API path prefix.
const API_PATH: &str = "api/json/v1";

/// Upper bound on pages followed by a single unsorted `find`.
const MAX_PAGES: usize = 100;

/// Client for the managed store. Construct once and share for the process lifetime.
pub struct DataApiClient {
    /// HTTP client.
    client: Client,

    /// Database endpoint without trailing slash.
    endpoint: String,

    /// Keyspace holding the collections.
    keyspace: String,

    /// Application token.
    token: SecretString,
}

impl DataApiClient {
    /// Create a client from store settings. Fails when endpoint or token is missing.
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        let endpoint = settings.require_endpoint()?.to_string();
        let token = settings.require_token()?.clone();

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            keyspace: settings.keyspace.clone(),
            token,
        })
    }

    fn keyspace_url(&self) -> String {
        format!("{}/{}/{}", self.endpoint, API_PATH, self.keyspace)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.keyspace_url(), collection)
    }

    /// Send one command and return the response body.
    async fn command(&self, url: &str, body: Value) -> Result<Value> {
        let name = body
            .as_object()
            .and_then(|o| o.keys().next().cloned())
            .unwrap_or_default();
        debug!("Data API {} -> {}", name, url);

        let response = self
            .client
            .post(url)
            .header("Token", self.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        if let Some(message) = command_errors(&payload) {
            return Err(StoreError::Command(message));
        }

        Ok(payload)
    }

    async fn find_page(
        &self,
        collection: &str,
        query: &FindQuery,
        page_state: Option<&str>,
    ) -> Result<(Vec<Document>, Option<String>)> {
        let mut find = Document::new();
        find.insert("filter".to_string(), query.filter.to_json());

        if let Some(text) = &query.vectorize {
            let mut sort = Document::new();
            sort.insert(VECTORIZE_FIELD.to_string(), Value::from(text.as_str()));
            find.insert("sort".to_string(), Value::Object(sort));
        }

        let mut options = Document::new();
        if let Some(limit) = query.limit {
            options.insert("limit".to_string(), Value::from(limit));
        }
        if query.include_similarity && query.vectorize.is_some() {
            options.insert("includeSimilarity".to_string(), Value::Bool(true));
        }
        if let Some(state) = page_state {
            options.insert("pageState".to_string(), Value::from(state));
        }
        if !options.is_empty() {
            find.insert("options".to_string(), Value::Object(options));
        }

        let payload = self
            .command(&self.collection_url(collection), json!({ "find": find }))
            .await?;

        let documents: Vec<Document> = payload
            .pointer("/data/documents")
            .and_then(Value::as_array)
            .map(|docs| {
                docs.iter()
                    .filter_map(|d| d.as_object().cloned())
                    .collect()
            })
            .unwrap_or_default();

        let next = payload
            .pointer("/data/nextPageState")
            .and_then(Value::as_str)
            .map(String::from);

        Ok((documents, next))
    }
}

/// Join the messages of a Data API `errors` array, if there is one.
fn command_errors(payload: &Value) -> Option<String> {
    let errors = payload.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    let messages: Vec<String> = errors
        .iter()
        .map(|e| {
            let message = e
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            match e.get("errorCode").and_then(Value::as_str) {
                Some(code) => format!("{} ({})", message, code),
                None => message.to_string(),
            }
        })
        .collect();

    Some(messages.join("; "))
}

fn count(payload: &Value, field: &str) -> u64 {
    payload
        .get("status")
        .and_then(|s| s.get(field))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

#[async_trait]
impl DocumentStore for DataApiClient {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()> {
        let mut create = json!({ "name": spec.name });
        if let Some(options) = spec.options() {
            create["options"] = options;
        }

        match self
            .command(&self.keyspace_url(), json!({ "createCollection": create }))
            .await
        {
            Ok(_) => {
                info!("Collection ready: {}", spec.name);
                Ok(())
            }
            Err(e) if e.has_code(EXISTING_COLLECTION_DIFFERENT_SETTINGS) => {
                warn!("Using existing collection {}: {}", spec.name, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Option<String>> {
        let payload = self
            .command(
                &self.collection_url(collection),
                json!({ "insertOne": { "document": document } }),
            )
            .await?;

        let id = payload
            .pointer("/status/insertedIds/0")
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        Ok(id)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let payload = self
            .command(
                &self.collection_url(collection),
                json!({ "findOne": { "filter": filter.to_json() } }),
            )
            .await?;

        Ok(payload
            .pointer("/data/document")
            .and_then(Value::as_object)
            .cloned())
    }

    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>> {
        let (mut documents, mut next) = self.find_page(collection, query, None).await?;

        // Vector sorts return a single page; plain finds may continue.
        let mut pages = 1;
        while let Some(state) = next.take() {
            if query.vectorize.is_some() || pages >= MAX_PAGES {
                break;
            }
            if let Some(limit) = query.limit {
                if documents.len() >= limit {
                    break;
                }
            }

            let (more, following) = self.find_page(collection, query, Some(&state)).await?;
            documents.extend(more);
            next = following;
            pages += 1;
        }

        if let Some(limit) = query.limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn update_one(&self, collection: &str, filter: &Filter, set: Document) -> Result<u64> {
        let payload = self
            .command(
                &self.collection_url(collection),
                json!({ "updateOne": { "filter": filter.to_json(), "update": { "$set": set } } }),
            )
            .await?;

        Ok(count(&payload, "matchedCount"))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let payload = self
            .command(
                &self.collection_url(collection),
                json!({ "deleteOne": { "filter": filter.to_json() } }),
            )
            .await?;

        Ok(count(&payload, "deletedCount"))
    }
}
