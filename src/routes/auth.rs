use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    auth::{hash_password, verify_password},
    error::{AppError, AppResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(AppError::InvalidInput(
            "Username, email, and password are required.".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    let user_id = state
        .profiles
        .create_user(request.username.trim(), request.email.trim(), &password_hash)
        .await?;

    tracing::info!(user_id = %user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully." })),
    ))
}

/// Login and receive an access token
///
/// Unknown email and wrong password collapse to the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required.".to_string(),
        ));
    }

    let credentials = state
        .profiles
        .find_credentials(request.email.trim())
        .await?
        .ok_or_else(|| AppError::InvalidInput("Invalid credentials.".to_string()))?;

    if !verify_password(&request.password, &credentials.password_hash)? {
        return Err(AppError::InvalidInput("Invalid credentials.".to_string()));
    }

    let token = state.tokens.issue(credentials.user_id)?;

    Ok(Json(LoginResponse { token }))
}
