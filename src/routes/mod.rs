use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{authenticate, make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod auth;
pub mod catalog;
pub mod history;
pub mod preferences;
pub mod suggestions;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/preferences", put(preferences::update))
        .route("/suggestions", get(suggestions::suggest))
        .route("/history", post(history::log_watched))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/catalog/refresh", post(catalog::refresh))
        .merge(protected)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
