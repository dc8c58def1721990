//! Mood entry routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MoodService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use balance_plus_shared::{CreateMoodEntryRequest, MoodEntry};

pub fn mood_routes() -> Router<AppState> {
    Router::new().route("/", get(list_entries).post(create_entry))
}

/// POST /mood
async fn create_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<CreateMoodEntryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MoodEntry>)> {
    let Json(req) = payload?;
    let entry =
        MoodService::create(state.repos.mood_entries.as_ref(), auth_user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /mood
async fn list_entries(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<MoodEntry>>> {
    let entries = MoodService::recent(state.repos.mood_entries.as_ref(), auth_user.user_id).await?;
    Ok(Json(entries))
}
