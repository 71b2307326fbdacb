use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{CatalogStore, ProfileStore},
    error::{AppError, AppResult},
};

/// Records that a user watched a movie.
///
/// The read-check-append runs as a single conditional write at the store, so
/// concurrent calls for the same user cannot lose updates or duplicate an
/// entry; see [`ProfileStore::append_history_if_absent`].
pub async fn log_watched(
    catalog: Arc<dyn CatalogStore>,
    profiles: Arc<dyn ProfileStore>,
    user_id: Uuid,
    movie_id: &str,
) -> AppResult<()> {
    if movie_id.trim().is_empty() {
        return Err(AppError::InvalidInput("movieId is required.".to_string()));
    }

    if catalog.find_by_id(movie_id).await?.is_none() {
        tracing::warn!(user_id = %user_id, movie_id = %movie_id, "Attempt to log non-existent movie");
        return Err(AppError::NotFound("Movie not found.".to_string()));
    }

    let appended = profiles
        .append_history_if_absent(user_id, movie_id, Utc::now())
        .await?;

    if !appended {
        tracing::warn!(user_id = %user_id, movie_id = %movie_id, "Attempt to log already watched movie");
        return Err(AppError::AlreadyLogged(
            "Movie already logged in watch history.".to_string(),
        ));
    }

    tracing::info!(user_id = %user_id, movie_id = %movie_id, "Movie added to watch history");
    Ok(())
}
