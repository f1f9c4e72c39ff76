//! Shared fixtures for the integration tests.
//!
//! [`Stack`] wires the real HTTP server router to a real flow client and a
//! real Data API client, each pointed at its own mock server.

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use fitflow_core::config::{FlowSettings, StoreSettings};
use fitflow_core::SecretString;
use fitflow_flows::LangflowClient;
use fitflow_gateway::{AppState, Server, ServerConfig};
use fitflow_store::{DataApiClient, FitnessRepository};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

/// Keyspace used by every fixture.
pub const KEYSPACE: &str = "fitness";

/// Flow engine API key used by every fixture.
pub const FLOW_API_KEY: &str = "flow-key";

/// Store token used by every fixture.
pub const STORE_TOKEN: &str = "AstraCS:integration";

const BODY_LIMIT: usize = 1_048_576;

/// Data API path of `collection`.
pub fn collection_path(collection: &str) -> String {
    format!("/api/json/v1/{}/{}", KEYSPACE, collection)
}

/// The API router backed by mock upstreams.
pub struct Stack {
    pub router: Router,
    pub flow_engine: MockServer,
    pub database: MockServer,
}

impl Stack {
    pub async fn start() -> Self {
        let flow_engine = MockServer::start().await;
        let database = MockServer::start().await;

        let flows = LangflowClient::new(&FlowSettings {
            base_url: Some(flow_engine.uri()),
            api_key: Some(SecretString::new(FLOW_API_KEY)),
            ..Default::default()
        })
        .unwrap();

        let store = DataApiClient::new(&StoreSettings {
            endpoint: Some(database.uri()),
            token: Some(SecretString::new(STORE_TOKEN)),
            keyspace: KEYSPACE.to_string(),
            ..Default::default()
        })
        .unwrap();

        let state = AppState::new(FitnessRepository::new(Arc::new(store)), Arc::new(flows));
        let config = ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            allowed_origins: None,
        };
        let router = Server::new(config, state).router();

        Self {
            router,
            flow_engine,
            database,
        }
    }

    /// Send a request and return the status and JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
