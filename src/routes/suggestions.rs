use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::CurrentUser,
    services::suggestions::{self, SuggestionQuery, SuggestionResponse},
    state::AppState,
};

/// Ranked movie suggestions for the authenticated user, with optional
/// `genre` and `actor` query overrides
pub async fn suggest(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<SuggestionQuery>,
) -> AppResult<Json<SuggestionResponse>> {
    let response =
        suggestions::suggest(state.catalog.clone(), &state.enricher, &user, &query).await?;
    Ok(Json(response))
}
