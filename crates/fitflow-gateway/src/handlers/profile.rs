//! Profile endpoints.

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use fitflow_core::{Document, Profile, ProfileUpdate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /profile`. Every present group is applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    /// Target user; a fresh id is generated when absent.
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub general: Option<Document>,

    #[serde(default)]
    pub goals: Option<Vec<String>>,

    #[serde(default)]
    pub nutrition: Option<Document>,
}

impl ProfileRequest {
    /// The requested updates, in application order.
    fn updates(self) -> Vec<ProfileUpdate> {
        let mut updates = Vec::new();
        if let Some(general) = self.general {
            updates.push(ProfileUpdate::General(general));
        }
        if let Some(goals) = self.goals {
            updates.push(ProfileUpdate::Goals(goals));
        }
        if let Some(nutrition) = self.nutrition {
            updates.push(ProfileUpdate::Nutrition(nutrition));
        }
        updates
    }
}

/// A profile and its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub profile: Profile,
}

/// `GET /profile/:id`, creating the default profile on first access.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .repository
        .create_profile(&user_id)
        .await
        .map_err(ApiError::storage("Failed to retrieve profile"))?;

    Ok(Json(ProfileResponse {
        user_id: profile.user_id.clone(),
        profile,
    }))
}

/// `POST /profile`
pub async fn upsert_profile(
    State(state): State<AppState>,
    AppJson(mut request): AppJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = match request.user_id.take().filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            info!("No userId given, using {}", id);
            id
        }
    };

    let profile = state
        .repository
        .update_profile_groups(&user_id, request.updates())
        .await
        .map_err(ApiError::storage("Failed to update profile"))?;

    Ok(Json(ProfileResponse { user_id, profile }))
}
