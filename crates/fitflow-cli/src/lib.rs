//! FitFlow command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FitFlow - AI fitness coaching API
#[derive(Parser)]
#[command(name = "fitflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Dotenv file to seed the environment from (existing variables win)
    #[arg(long, env = "FITFLOW_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Ask the workout advice flow a question
    Advice(commands::flows::AdviceArgs),

    /// Ask the macro plan flow for a nutrition plan
    MacroPlan(commands::flows::MacroPlanArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Advice(args) => commands::flows::advice(args).await,
        Commands::MacroPlan(args) => commands::flows::macro_plan(args).await,
        Commands::Version => {
            println!("fitflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
