//! HTTP server.

use crate::handlers;
use crate::state::AppState;
use crate::Result;
use axum::http::{HeaderValue, Method};
use axum::Router;
use fitflow_core::config::ServerSettings;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Allowed CORS origins. `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
}

impl ServerConfig {
    /// Build from service settings.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self> {
        Ok(Self {
            addr: settings.socket_addr()?,
            allowed_origins: settings.allowed_origins.clone(),
        })
    }
}

/// The FitFlow HTTP server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Create the router with CORS and request tracing.
    pub fn router(&self) -> Router {
        handlers::router(self.state.clone())
            .layer(cors_layer(self.config.allowed_origins.as_deref()))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes, then drain in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;

        info!("FitFlow API listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("FitFlow API stopped");
        Ok(())
    }
}

/// CORS layer for `origins`; any origin when `None`.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    match origins {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::TestApp;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn config(origins: Option<Vec<String>>) -> ServerConfig {
        ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            allowed_origins: origins,
        }
    }

    async fn server(origins: Option<Vec<String>>) -> TestApp {
        let mut app = TestApp::new().await;
        let state = AppState::new(app.repository.clone(), app.flows.clone());
        app.router = Server::new(config(origins), state).router();
        app
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/notes")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ServerSettings {
            host: "localhost".to_string(),
            port: 9001,
            allowed_origins: Some(vec!["http://localhost:3000".to_string()]),
        };

        let config = ServerConfig::from_settings(&settings).unwrap();
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 9001)));
        assert_eq!(config.allowed_origins.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_any_origin_by_default() {
        let app = server(None).await;

        let response = app
            .router
            .clone()
            .oneshot(preflight("https://app.example.com"))
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_origin_allowlist() {
        let app = server(Some(vec!["http://localhost:3000".to_string()])).await;

        let allowed = app
            .router
            .clone()
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let denied = app
            .router
            .clone()
            .oneshot(preflight("https://evil.example.com"))
            .await
            .unwrap();
        assert!(denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_router_serves_routes_behind_layers() {
        let app = server(None).await;
        let (status, _) = app.send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let app = TestApp::new().await;
        let state = AppState::new(app.repository.clone(), app.flows.clone());
        let server = Server::new(config(None), state);

        server.run_until(async {}).await.unwrap();
    }
}
