use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::AppResult, services::ingestion, state::AppState};

/// Pull popular movies from the metadata provider into the catalog
pub async fn refresh(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let report = ingestion::refresh_catalog(state.metadata.clone(), state.catalog.clone()).await?;

    Ok(Json(json!({
        "message": "Movies fetched and stored successfully.",
        "fetched": report.fetched,
        "stored": report.stored,
    })))
}
