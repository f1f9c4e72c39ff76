//! FitFlow CLI entry point.

use clap::Parser;
use fitflow_cli::{run, Cli};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "fitflow=info",
        1 => "fitflow=debug",
        _ => "fitflow=trace,tower_http=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = fitflow_core::env::load_dotenv_from(&cli.env_file) {
        warn!("Could not read {}: {}", cli.env_file.display(), e);
    }

    // Run the command
    run(cli).await
}
