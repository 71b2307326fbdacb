use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::CurrentUser,
    models::Preferences,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub genres: Option<Vec<String>>,
    pub actors: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePreferencesResponse {
    pub message: String,
    pub preferences: Preferences,
}

/// Replace the stored preference sets, per field; omitted fields are left
/// untouched.
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<UpdatePreferencesResponse>> {
    if request.genres.is_none() && request.actors.is_none() {
        return Err(AppError::InvalidInput(
            "At least one of genres or actors must be provided.".to_string(),
        ));
    }

    let preferences = state
        .profiles
        .update_preferences(user.id, request.genres, request.actors)
        .await?;

    tracing::info!(user_id = %user.id, "User preferences updated");

    Ok(Json(UpdatePreferencesResponse {
        message: "Preferences updated successfully.".to_string(),
        preferences,
    }))
}
