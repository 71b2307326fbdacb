use sqlx::PgPool;

use crate::{error::AppResult, models::Movie};

/// Read-mostly movie catalog collaborator.
///
/// Movies are written only by the ingestion job; the recommendation core
/// treats the collection as read-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Movies matching the effective filters, excluding the given ids.
    ///
    /// An empty genre or actor filter means "no constraint" for that field.
    /// Ordering is store-defined; the result is capped at `limit`.
    async fn find_candidates(
        &self,
        genres: &[String],
        actors: &[String],
        exclude_ids: &[String],
        limit: i64,
    ) -> AppResult<Vec<Movie>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Movie>>;

    /// Stores a movie unless its id is already present; returns whether it
    /// was inserted. Existing movies are never mutated.
    async fn insert_if_new(&self, movie: &Movie) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_candidates(
        &self,
        genres: &[String],
        actors: &[String],
        exclude_ids: &[String],
        limit: i64,
    ) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, genres, actors, director, release_year, description
            FROM movies
            WHERE (cardinality($1::text[]) = 0 OR genres && $1)
              AND (cardinality($2::text[]) = 0 OR actors && $2)
              AND NOT (id = ANY($3::text[]))
            LIMIT $4
            "#,
        )
        .bind(genres)
        .bind(actors)
        .bind(exclude_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, genres, actors, director, release_year, description
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn insert_if_new(&self, movie: &Movie) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO movies (id, title, genres, actors, director, release_year, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(&movie.genres)
        .bind(&movie.actors)
        .bind(&movie.director)
        .bind(movie.release_year)
        .bind(&movie.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
