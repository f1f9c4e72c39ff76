//! Note endpoints.

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use fitflow_core::Note;
use fitflow_store::StoreError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Largest accepted search limit.
pub const MAX_SEARCH_LIMIT: usize = 1000;

/// Body of `POST /notes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    pub user_id: String,
    pub text: String,
}

/// Body of `POST /notes/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesResponse {
    pub user_id: String,
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub status: &'static str,
    pub note_id: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Note>,
    pub count: usize,
}

/// `GET /notes/:id`
pub async fn list_notes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<NotesResponse>, ApiError> {
    let notes = state
        .repository
        .list_notes(&user_id)
        .await
        .map_err(ApiError::storage("Failed to retrieve notes"))?;

    Ok(Json(NotesResponse { user_id, notes }))
}

/// `POST /notes`
pub async fn create_note(
    State(state): State<AppState>,
    AppJson(request): AppJson<NoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let user_id = ApiError::require("userId", &request.user_id)?;
    let text = ApiError::require("text", &request.text)?;

    let note = state
        .repository
        .add_note(text, user_id)
        .await
        .map_err(|e| match e {
            StoreError::Persistence(message) => ApiError::bad_request(message),
            other => ApiError::storage("Failed to create note")(other),
        })?;

    Ok(Json(NoteResponse { note }))
}

/// `DELETE /notes/:id`. Succeeds whether or not the note existed.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state
        .repository
        .delete_note(&note_id)
        .await
        .map_err(ApiError::storage("Failed to delete note"))?;

    if removed {
        info!("Deleted note {}", note_id);
    } else {
        debug!("Note {} was already gone", note_id);
    }

    Ok(Json(DeleteResponse {
        status: "deleted",
        note_id,
    }))
}

/// `POST /notes/search`
pub async fn search_notes(
    State(state): State<AppState>,
    AppJson(request): AppJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let user_id = ApiError::require("userId", request.user_id.as_deref().unwrap_or_default())?;
    let limit = request
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);

    let results = state
        .repository
        .search_similar_notes(&request.query, user_id, limit)
        .await;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}
