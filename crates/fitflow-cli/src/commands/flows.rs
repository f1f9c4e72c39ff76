//! One-shot flow commands.

use anyhow::Context;
use clap::Args;
use fitflow_core::ServiceConfig;
use fitflow_flows::{CoachingFlows, LangflowClient};

/// Advice command arguments.
#[derive(Args)]
pub struct AdviceArgs {
    /// The training or nutrition question
    #[arg(short, long)]
    pub question: String,

    /// Profile summary, e.g. "male, 75kg, 175cm, very active"
    #[arg(short, long, default_value = "")]
    pub profile: String,
}

/// Macro plan command arguments.
#[derive(Args)]
pub struct MacroPlanArgs {
    /// Primary nutrition goal
    #[arg(short, long)]
    pub goal: String,

    /// Profile summary
    #[arg(short, long, default_value = "")]
    pub profile: String,
}

fn client() -> anyhow::Result<LangflowClient> {
    let config = ServiceConfig::from_env();
    LangflowClient::new(&config.flows).context("Flow engine is not configured")
}

/// Run the advice command.
pub async fn advice(args: AdviceArgs) -> anyhow::Result<()> {
    let text = client()?
        .workout_recommendation(&args.profile, &args.question)
        .await
        .context("Advice generation failed")?;

    println!("{}", text);
    Ok(())
}

/// Run the macro plan command.
pub async fn macro_plan(args: MacroPlanArgs) -> anyhow::Result<()> {
    let text = client()?
        .macro_plan(&args.goal, &args.profile)
        .await
        .context("Macro plan generation failed")?;

    println!("{}", text);
    Ok(())
}
