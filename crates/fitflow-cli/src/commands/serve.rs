//! Serve command.

use anyhow::Context;
use clap::Args;
use fitflow_core::ServiceConfig;
use fitflow_flows::LangflowClient;
use fitflow_gateway::{AppState, Server, ServerConfig};
use fitflow_store::{DataApiClient, DocumentStore, FitnessRepository, MemoryDocumentStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Serve command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides FITFLOW_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port number (overrides FITFLOW_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Keep profiles and notes in memory instead of the managed store
    #[arg(long)]
    pub memory_store: bool,
}

impl ServeArgs {
    /// Layer the flags over environment configuration.
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Run the serve command.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServiceConfig::from_env();
    args.apply(&mut config);

    let flows = LangflowClient::new(&config.flows).context("Flow engine is not configured")?;

    let store: Arc<dyn DocumentStore> = if args.memory_store {
        warn!("Using the in-memory store; profiles and notes are lost on exit");
        Arc::new(MemoryDocumentStore::new())
    } else {
        let client =
            DataApiClient::new(&config.store).context("Document store is not configured")?;
        Arc::new(client)
    };

    let repository = FitnessRepository::new(store);
    repository
        .initialize(&config.store.vectorize)
        .await
        .context("Failed to initialize collections")?;

    let server_config = ServerConfig::from_settings(&config.server)?;
    info!("Starting FitFlow API on {}", server_config.addr);

    Server::new(server_config, AppState::new(repository, Arc::new(flows)))
        .run()
        .await?;

    Ok(())
}
