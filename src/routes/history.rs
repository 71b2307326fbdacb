use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult, middleware::CurrentUser, services::history, state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWatchedRequest {
    pub movie_id: String,
}

/// Log a watched movie for the authenticated user
pub async fn log_watched(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<LogWatchedRequest>,
) -> AppResult<Json<Value>> {
    history::log_watched(
        state.catalog.clone(),
        state.profiles.clone(),
        user.id,
        &request.movie_id,
    )
    .await?;

    Ok(Json(
        json!({ "message": "Movie logged in watch history successfully." }),
    ))
}
