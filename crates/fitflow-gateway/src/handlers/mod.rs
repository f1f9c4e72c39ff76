//! HTTP route handlers.
//!
//! | Route                   | Handler                     |
//! |-------------------------|-----------------------------|
//! | `GET /health`           | [`health::health`]          |
//! | `POST /macro-plan`      | [`coaching::macro_plan`]    |
//! | `POST /workout-advice`  | [`coaching::workout_advice`]|
//! | `GET /profile/:id`      | [`profile::get_profile`]    |
//! | `POST /profile`         | [`profile::upsert_profile`] |
//! | `GET /notes/:id`        | [`notes::list_notes`]       |
//! | `POST /notes`           | [`notes::create_note`]      |
//! | `DELETE /notes/:id`     | [`notes::delete_note`]      |
//! | `POST /notes/search`    | [`notes::search_notes`]     |

pub mod coaching;
pub mod health;
pub mod notes;
pub mod profile;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Build the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/macro-plan", post(coaching::macro_plan))
        .route("/workout-advice", post(coaching::workout_advice))
        .route("/profile", post(profile::upsert_profile))
        .route("/profile/:id", get(profile::get_profile))
        .route("/notes", post(notes::create_note))
        .route("/notes/search", post(notes::search_notes))
        .route("/notes/:id", get(notes::list_notes).delete(notes::delete_note))
        .with_state(state)
}
