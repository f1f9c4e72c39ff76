//! Flow engine client.
//!
//! A flow run is a `POST {base_url}/api/v1/run/{flow_id}` whose `tweaks`
//! object sets the `input_value` of the flow's named text-input components.

use crate::error::{FlowError, Result};
use crate::extract::extract_text;
use crate::CoachingFlows;
use async_trait::async_trait;
use fitflow_core::config::FlowSettings;
use fitflow_core::SecretString;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Text-input component for the profile summary in the workout flow.
const WORKOUT_PROFILE_INPUT: &str = "TextInput-TnbDG";

/// Text-input component for the question in the workout flow.
const WORKOUT_QUESTION_INPUT: &str = "TextInput-Pt27D";

/// Text-input component for the goal in the macro flow.
const MACRO_GOAL_INPUT: &str = "TextInput-heTA9";

/// Text-input component for the profile summary in the macro flow.
const MACRO_PROFILE_INPUT: &str = "TextInput-5TY21";

/// Longest slice of an error body kept in an upstream error.
const MAX_ERROR_BODY: usize = 1000;

/// A flow and the ids of its two text-input components, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSpec {
    /// Flow id or endpoint name.
    pub flow_id: String,

    /// Component ids receiving the first and second text input.
    pub inputs: [String; 2],
}

impl FlowSpec {
    /// The workout advice flow: `(profile, question)`.
    pub fn workout(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            inputs: [
                WORKOUT_PROFILE_INPUT.to_string(),
                WORKOUT_QUESTION_INPUT.to_string(),
            ],
        }
    }

    /// The macro plan flow: `(goal, profile)`.
    pub fn macro_plan(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            inputs: [MACRO_GOAL_INPUT.to_string(), MACRO_PROFILE_INPUT.to_string()],
        }
    }

    /// Build the run payload, with a fresh session id.
    fn payload(&self, first: &str, second: &str) -> RunRequest {
        let mut tweaks = Map::new();
        tweaks.insert(self.inputs[0].clone(), json!({ "input_value": first }));
        tweaks.insert(self.inputs[1].clone(), json!({ "input_value": second }));

        RunRequest {
            output_type: "text",
            input_type: "text",
            tweaks,
            session_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunRequest {
    output_type: &'static str,
    input_type: &'static str,
    tweaks: Map<String, Value>,
    session_id: String,
}

/// Flow engine client. Construct once; cheap to share behind an `Arc`.
pub struct LangflowClient {
    /// HTTP client.
    client: Client,

    /// Engine base URL without trailing slash.
    base_url: String,

    /// API key.
    api_key: SecretString,

    /// Workout advice flow.
    workout: FlowSpec,

    /// Macro plan flow.
    macro_plan: FlowSpec,
}

impl LangflowClient {
    /// Create a client. Fails when the API key or base URL is missing.
    pub fn new(settings: &FlowSettings) -> Result<Self> {
        let base_url = settings.require_base_url()?.to_string();
        let api_key = settings.require_api_key()?.clone();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FlowError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            workout: FlowSpec::workout(&settings.workout_flow_id),
            macro_plan: FlowSpec::macro_plan(&settings.macro_flow_id),
        })
    }

    fn run_url(&self, flow: &FlowSpec) -> String {
        format!("{}/api/v1/run/{}", self.base_url, flow.flow_id)
    }

    /// Run a flow and return its raw JSON response.
    async fn run(&self, flow: &FlowSpec, first: &str, second: &str) -> Result<Value> {
        let url = self.run_url(flow);
        let payload = flow.payload(first, second);
        debug!("Running flow {} (session {})", flow.flow_id, payload.session_id);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Flow {} request failed: {}", flow.flow_id, e);
                FlowError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if let Some((cut, _)) = body.char_indices().nth(MAX_ERROR_BODY) {
                body.truncate(cut);
            }
            warn!("Flow {} returned HTTP {}: {}", flow.flow_id, status, body);
            return Err(FlowError::status(status.as_u16(), body));
        }

        response.json().await.map_err(|e| {
            warn!("Flow {} returned a non-JSON body: {}", flow.flow_id, e);
            FlowError::format(format!("response body is not JSON: {}", e))
        })
    }

    async fn run_for_text(&self, flow: &FlowSpec, first: &str, second: &str) -> Result<String> {
        let payload = self.run(flow, first, second).await?;
        let text = extract_text(&payload)?;
        info!("Flow {} produced {} chars", flow.flow_id, text.chars().count());
        Ok(text)
    }
}

#[async_trait]
impl CoachingFlows for LangflowClient {
    async fn workout_recommendation(&self, profile: &str, question: &str) -> Result<String> {
        self.run_for_text(&self.workout, profile, question).await
    }

    async fn macro_plan(&self, goal: &str, profile: &str) -> Result<String> {
        self.run_for_text(&self.macro_plan, goal, profile).await
    }
}
