//! Configuration schema definitions.

use crate::secret::SecretString;

/// Default flow engine URL when `LANGFLOW_BASE_URL` is unset.
pub const DEFAULT_FLOW_BASE_URL: &str = "http://localhost:7860";

/// Default flow id for workout advice.
pub const DEFAULT_WORKOUT_FLOW_ID: &str = "ask-ai-v2-1";

/// Default flow id for macro plans.
pub const DEFAULT_MACRO_FLOW_ID: &str = "03ffb633-f1e5-42d6-84c9-e02b4cee1f41";

/// Timeout for a single flow run.
pub const DEFAULT_FLOW_TIMEOUT_SECS: u64 = 30;

/// Keyspace used when `ASTRA_DB_KEYSPACE` is unset.
pub const DEFAULT_KEYSPACE: &str = "default_keyspace";

/// Embedding provider for the notes collection.
pub const DEFAULT_VECTORIZE_PROVIDER: &str = "nvidia";

/// Embedding model for the notes collection.
pub const DEFAULT_VECTORIZE_MODEL: &str = "NV-Embed-QA";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Main FitFlow configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerSettings,

    /// Flow engine settings.
    pub flows: FlowSettings,

    /// Document store settings.
    pub store: StoreSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,

    /// Port number.
    pub port: u16,

    /// CORS origin allowlist. `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: None,
        }
    }
}

/// Flow engine settings.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Base URL of the flow engine.
    pub base_url: Option<String>,

    /// API key sent as `x-api-key`.
    pub api_key: Option<SecretString>,

    /// Flow id for workout advice.
    pub workout_flow_id: String,

    /// Flow id for macro plans.
    pub macro_flow_id: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_FLOW_BASE_URL.to_string()),
            api_key: None,
            workout_flow_id: DEFAULT_WORKOUT_FLOW_ID.to_string(),
            macro_flow_id: DEFAULT_MACRO_FLOW_ID.to_string(),
            timeout_secs: DEFAULT_FLOW_TIMEOUT_SECS,
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Data API endpoint, e.g. `https://<db-id>-<region>.apps.astra.datastax.com`.
    pub endpoint: Option<String>,

    /// Application token.
    pub token: Option<SecretString>,

    /// Keyspace holding the collections.
    pub keyspace: String,

    /// Server-side embedding service for the notes collection.
    pub vectorize: VectorizeSettings,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            keyspace: DEFAULT_KEYSPACE.to_string(),
            vectorize: VectorizeSettings::default(),
        }
    }
}

/// Server-side embedding service used for `$vectorize` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizeSettings {
    /// Embedding provider name.
    pub provider: String,

    /// Embedding model name.
    pub model: String,
}

impl Default for VectorizeSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_VECTORIZE_PROVIDER.to_string(),
            model: DEFAULT_VECTORIZE_MODEL.to_string(),
        }
    }
}
