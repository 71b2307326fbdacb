use std::sync::Arc;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Movie, Preferences},
};

/// Upper bound on the candidate set, regardless of how many movies match
pub const MAX_CANDIDATES: i64 = 10;

/// The genre/actor sets actually used for one request, after
/// override-vs-stored-preference resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveFilter {
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// Resolves the effective filter for a request.
///
/// A non-empty override fully replaces the stored set for its field; the two
/// are never unioned. Fields resolve independently, so a genre override
/// leaves actor selection on stored preferences and vice versa. Blank
/// overrides count as absent.
pub fn resolve_filter(
    genre_override: Option<&str>,
    actor_override: Option<&str>,
    stored: &Preferences,
) -> EffectiveFilter {
    let genres = match genre_override.map(str::trim).filter(|g| !g.is_empty()) {
        Some(genre) => vec![genre.to_string()],
        None => stored.genres.clone(),
    };

    let actors = match actor_override.map(str::trim).filter(|a| !a.is_empty()) {
        Some(actor) => vec![actor.to_string()],
        None => stored.actors.clone(),
    };

    EffectiveFilter { genres, actors }
}

/// Fetches the bounded, deduplicated candidate list for an effective filter.
///
/// A movie qualifies when it overlaps each non-empty filter set and is not in
/// `excluded_ids`. Both filters empty degenerates to "any unwatched movie",
/// which is the intended fallback for users with no stored preferences. An
/// empty result is a valid outcome, not an error.
pub async fn select_candidates(
    catalog: Arc<dyn CatalogStore>,
    filter: &EffectiveFilter,
    excluded_ids: &[String],
    limit: i64,
) -> AppResult<Vec<Movie>> {
    let mut movies = catalog
        .find_candidates(&filter.genres, &filter.actors, excluded_ids, limit)
        .await?;

    // The store applies the limit too; this guards the bound against any
    // store implementation that does not.
    movies.truncate(limit as usize);

    Ok(movies)
}
