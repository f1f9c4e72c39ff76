//! Configuration loading from the environment.

use super::schema::*;
use crate::env::{self, vars};
use crate::error::ConfigError;
use crate::secret::SecretString;
use std::net::{IpAddr, SocketAddr};

impl ServiceConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env::get_var)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values must be reported as `None` by the lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let server = ServerSettings {
            host: get(vars::FITFLOW_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get(vars::FITFLOW_PORT)
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            allowed_origins: get(vars::FITFLOW_ALLOWED_ORIGINS).map(|v| env::split_list(&v)),
        };

        let flows = FlowSettings {
            base_url: Some(
                get(vars::LANGFLOW_BASE_URL).unwrap_or_else(|| DEFAULT_FLOW_BASE_URL.to_string()),
            ),
            api_key: get(vars::LANGFLOW_API_KEY).map(SecretString::new),
            workout_flow_id: get(vars::FITFLOW_WORKOUT_FLOW_ID)
                .unwrap_or_else(|| DEFAULT_WORKOUT_FLOW_ID.to_string()),
            macro_flow_id: get(vars::FITFLOW_MACRO_FLOW_ID)
                .unwrap_or_else(|| DEFAULT_MACRO_FLOW_ID.to_string()),
            timeout_secs: DEFAULT_FLOW_TIMEOUT_SECS,
        };

        let store = StoreSettings {
            endpoint: get(vars::ASTRA_DB_API_ENDPOINT),
            token: get(vars::ASTRA_DB_APPLICATION_TOKEN).map(SecretString::new),
            keyspace: get(vars::ASTRA_DB_KEYSPACE).unwrap_or_else(|| DEFAULT_KEYSPACE.to_string()),
            vectorize: VectorizeSettings {
                provider: get(vars::FITFLOW_VECTORIZE_PROVIDER)
                    .unwrap_or_else(|| DEFAULT_VECTORIZE_PROVIDER.to_string()),
                model: get(vars::FITFLOW_VECTORIZE_MODEL)
                    .unwrap_or_else(|| DEFAULT_VECTORIZE_MODEL.to_string()),
            },
        };

        Self {
            server,
            flows,
            store,
        }
    }
}

impl ServerSettings {
    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = match self.host.as_str() {
            "localhost" => IpAddr::from([127, 0, 0, 1]),
            host => host
                .parse()
                .map_err(|e| ConfigError::invalid(vars::FITFLOW_HOST, format!("{host}: {e}")))?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl StoreSettings {
    /// Endpoint, failing when it is not configured.
    pub fn require_endpoint(&self) -> Result<&str, ConfigError> {
        self.endpoint
            .as_deref()
            .map(|e| e.trim_end_matches('/'))
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::Missing(vars::ASTRA_DB_API_ENDPOINT))
    }

    /// Token, failing when it is not configured.
    pub fn require_token(&self) -> Result<&SecretString, ConfigError> {
        self.token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing(vars::ASTRA_DB_APPLICATION_TOKEN))
    }
}

impl FlowSettings {
    /// Base URL without a trailing slash, failing when it is not configured.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.base_url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing(vars::LANGFLOW_BASE_URL))
    }

    /// API key, failing when it is not configured.
    pub fn require_api_key(&self) -> Result<&SecretString, ConfigError> {
        self.api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing(vars::LANGFLOW_API_KEY))
    }
}
