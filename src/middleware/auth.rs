use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
    state::AppState,
};

/// The authenticated user's loaded profile, injected into request extensions
/// for downstream handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserProfile);

/// Resolves `Authorization: Bearer <token>` to a user profile.
///
/// Every failure mode is a 401: missing header, malformed scheme, bad or
/// expired signature, and a token whose user no longer exists.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("No token provided.".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Invalid token format.".to_string()))?;

    let user_id = state.tokens.verify(token)?;

    let profile = state
        .profiles
        .get(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Invalid token.".to_string()))?;

    request.extensions_mut().insert(CurrentUser(profile));

    Ok(next.run(request).await)
}
