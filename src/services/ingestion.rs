use std::sync::Arc;

use serde::Serialize;

use crate::{db::CatalogStore, error::AppResult, services::providers::MetadataProvider};

// The original seeding job pulls the first popular page only.
const POPULAR_PAGE: u32 = 1;

#[derive(Debug, Serialize)]
pub struct IngestionReport {
    pub fetched: usize,
    pub stored: usize,
}

/// Pulls popular movies from the metadata provider and stores the ones not
/// yet in the catalog. Existing movies are never touched, so re-running the
/// job is safe.
pub async fn refresh_catalog(
    provider: Arc<dyn MetadataProvider>,
    catalog: Arc<dyn CatalogStore>,
) -> AppResult<IngestionReport> {
    let movies = provider.popular_movies(POPULAR_PAGE).await?;
    let fetched = movies.len();

    let mut stored = 0;
    for movie in &movies {
        if catalog.insert_if_new(movie).await? {
            stored += 1;
        }
    }

    tracing::info!(fetched, stored, "Movies fetched and stored");

    Ok(IngestionReport { fetched, stored })
}
