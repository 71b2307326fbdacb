use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{MovieSummary, UserProfile},
    services::{
        candidates::{self, MAX_CANDIDATES},
        enrichment::SuggestionEnricher,
    },
};

/// Optional per-request overrides for the effective filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionQuery {
    pub genre: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub candidates: Vec<MovieSummary>,
    pub message: String,
}

/// End-to-end "suggest movies for this user" operation.
///
/// Read-only: the same profile and catalog contents yield the same candidate
/// set on every call. The message may vary when the generation model is
/// non-deterministic, which is accepted.
pub async fn suggest(
    catalog: Arc<dyn CatalogStore>,
    enricher: &SuggestionEnricher,
    profile: &UserProfile,
    query: &SuggestionQuery,
) -> AppResult<SuggestionResponse> {
    let filter = candidates::resolve_filter(
        query.genre.as_deref(),
        query.actor.as_deref(),
        &profile.preferences,
    );
    let watched = profile.watched_movie_ids();

    let selected = candidates::select_candidates(catalog, &filter, &watched, MAX_CANDIDATES).await?;

    // Enrichment handles the empty set and missing-credential cases itself;
    // only a transport failure aborts the request here.
    let message = enricher.enrich(&selected).await?;

    tracing::info!(
        user_id = %profile.id,
        candidates = selected.len(),
        "Suggestions generated"
    );

    Ok(SuggestionResponse {
        candidates: selected.iter().map(MovieSummary::from).collect(),
        message,
    })
}
