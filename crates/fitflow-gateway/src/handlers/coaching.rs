//! Generation endpoints.

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::summary::profile_summary;
use axum::extract::State;
use axum::Json;
use fitflow_core::{Document, Note};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Notes pulled into the workout question as context.
const CONTEXT_NOTES: usize = 3;

/// Header of the notes context block appended to the question.
const CONTEXT_HEADER: &str = "\n\n**Relevant context from your notes:**\n";

/// Body of `POST /macro-plan`.
#[derive(Debug, Deserialize)]
pub struct MacroPlanRequest {
    /// Primary nutrition goal, e.g. "build muscle".
    pub goal: String,

    /// Free-form profile attributes.
    #[serde(default)]
    pub profile: Document,
}

/// Body of `POST /workout-advice`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    /// The training or nutrition question.
    pub question: String,

    /// Preformatted profile summary; preferred over `profile`.
    #[serde(default)]
    pub profile_summary: Option<String>,

    /// Profile attributes, flattened when no summary is given.
    #[serde(default)]
    pub profile: Option<Document>,

    /// Owner of the notes to draw context from.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Generated text.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// `POST /macro-plan`
pub async fn macro_plan(
    State(state): State<AppState>,
    AppJson(request): AppJson<MacroPlanRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let goal = ApiError::require("goal", &request.goal)?;
    let profile = profile_summary(&request.profile);

    let text = state
        .flows
        .macro_plan(goal, &profile)
        .await
        .map_err(ApiError::generation("Macro plan generation failed"))?;

    Ok(Json(TextResponse { text }))
}

/// `POST /workout-advice`
///
/// When a `userId` is given, the owner's notes most similar to the question
/// are appended to it before the flow runs.
pub async fn workout_advice(
    State(state): State<AppState>,
    AppJson(request): AppJson<AdviceRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let question = ApiError::require("question", &request.question)?;

    let profile = match (&request.profile_summary, &request.profile) {
        (Some(summary), _) if !summary.is_empty() => summary.clone(),
        (_, Some(profile)) => profile_summary(profile),
        _ => String::new(),
    };

    let mut prompt = question.to_string();
    if let Some(user_id) = request.user_id.as_deref().filter(|id| !id.trim().is_empty()) {
        let notes = state
            .repository
            .search_similar_notes(question, user_id, CONTEXT_NOTES)
            .await;
        if let Some(context) = notes_context(&notes) {
            debug!("Adding {} note(s) of context for {}", notes.len(), user_id);
            prompt.push_str(&context);
        }
    }

    let text = state
        .flows
        .workout_recommendation(&profile, &prompt)
        .await
        .map_err(ApiError::generation("Advice generation failed"))?;

    info!("Generated workout advice ({} chars)", text.chars().count());
    Ok(Json(TextResponse { text }))
}

/// Render notes as a bulleted context block. `None` when no note has text.
fn notes_context(notes: &[Note]) -> Option<String> {
    let bullets: Vec<String> = notes
        .iter()
        .filter(|note| !note.text.is_empty())
        .map(|note| format!("- {}", note.text))
        .collect();

    if bullets.is_empty() {
        return None;
    }
    Some(format!("{}{}", CONTEXT_HEADER, bullets.join("\n")))
}
