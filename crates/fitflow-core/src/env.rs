//! Environment variable handling.

use std::env;
use std::path::Path;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated value into trimmed, non-blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Load environment variables from `.env` in the working directory.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    load_dotenv_from(Path::new(".env"))
}

/// Load environment variables from a dotenv-style file.
///
/// Variables that are already set in the process environment win over the file.
pub fn load_dotenv_from(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    let mut loaded = 0;
    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            // Remove quotes if present
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);

            if env::var(key).is_err() {
                env::set_var(key, value);
                loaded += 1;
            }
        }
    }
    tracing::debug!("Loaded {} variable(s) from {}", loaded, path.display());
    Ok(())
}

/// Environment variable names read by FitFlow.
pub mod vars {
    /// Base URL of the flow engine.
    pub const LANGFLOW_BASE_URL: &str = "LANGFLOW_BASE_URL";

    /// API key for the flow engine.
    pub const LANGFLOW_API_KEY: &str = "LANGFLOW_API_KEY";

    /// Flow id used for workout advice.
    pub const FITFLOW_WORKOUT_FLOW_ID: &str = "FITFLOW_WORKOUT_FLOW_ID";

    /// Flow id used for macro plans.
    pub const FITFLOW_MACRO_FLOW_ID: &str = "FITFLOW_MACRO_FLOW_ID";

    /// Data API endpoint of the document store.
    pub const ASTRA_DB_API_ENDPOINT: &str = "ASTRA_DB_API_ENDPOINT";

    /// Application token for the document store.
    pub const ASTRA_DB_APPLICATION_TOKEN: &str = "ASTRA_DB_APPLICATION_TOKEN";

    /// Keyspace holding the FitFlow collections.
    pub const ASTRA_DB_KEYSPACE: &str = "ASTRA_DB_KEYSPACE";

    /// Embedding provider used by the notes collection.
    pub const FITFLOW_VECTORIZE_PROVIDER: &str = "FITFLOW_VECTORIZE_PROVIDER";

    /// Embedding model used by the notes collection.
    pub const FITFLOW_VECTORIZE_MODEL: &str = "FITFLOW_VECTORIZE_MODEL";

    /// Address the HTTP server binds to.
    pub const FITFLOW_HOST: &str = "FITFLOW_HOST";

    /// Port the HTTP server listens on.
    pub const FITFLOW_PORT: &str = "FITFLOW_PORT";

    /// Comma-separated CORS origin allowlist.
    pub const FITFLOW_ALLOWED_ORIGINS: &str = "FITFLOW_ALLOWED_ORIGINS";
}
