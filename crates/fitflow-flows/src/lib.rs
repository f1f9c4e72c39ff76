//! Client for the hosted generative-AI flows behind FitFlow.
//!
//! Two flows are used:
//! - workout advice, fed a profile summary and a question
//! - macro plan, fed a nutrition goal and a profile summary
//!
//! # Example
//!
//! ```rust,ignore
//! use fitflow_core::ServiceConfig;
//! use fitflow_flows::{CoachingFlows, LangflowClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::from_env();
//!     let flows = LangflowClient::new(&config.flows)?;
//!
//!     let advice = flows
//!         .workout_recommendation("male, 75kg, 175cm, very active", "What is a good bicep workout?")
//!         .await?;
//!     println!("{}", advice);
//!
//!     Ok(())
//! }
//! ```

mod error;
pub mod extract;
pub mod langflow;

pub use error::{FlowError, Result};
pub use extract::extract_text;
pub use langflow::{FlowSpec, LangflowClient};

use async_trait::async_trait;

/// The coaching capabilities the HTTP API needs from the flow engine.
#[async_trait]
pub trait CoachingFlows: Send + Sync {
    /// Training advice for `question`, tailored to the `profile` summary.
    async fn workout_recommendation(&self, profile: &str, question: &str) -> Result<String>;

    /// A macronutrient plan for `goal`, tailored to the `profile` summary.
    async fn macro_plan(&self, goal: &str, profile: &str) -> Result<String>;
}
