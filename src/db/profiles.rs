use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Credentials, HistoryEntry, Preferences, UserProfile},
};

/// Per-user profile collaborator: stored preferences plus the append-only
/// watch-history log.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates a user with empty preferences and history.
    ///
    /// Fails with `InvalidInput` when the username or email is taken.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Uuid>;

    /// Login lookup; `None` when no such account exists
    async fn find_credentials(&self, email: &str) -> AppResult<Option<Credentials>>;

    /// Full profile read: preferences and history in viewing order
    async fn get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Per-field preference replace; `None` leaves a field untouched
    async fn update_preferences(
        &self,
        user_id: Uuid,
        genres: Option<Vec<String>>,
        actors: Option<Vec<String>>,
    ) -> AppResult<Preferences>;

    /// Appends a history entry unless the movie id is already present,
    /// returning whether it was appended.
    ///
    /// Must be atomic against concurrent appends for the same user: two
    /// requests that both observe "not yet watched" must not both land for
    /// the same movie id, and appends of distinct ids must not lose updates.
    /// Enforced by the store's uniqueness constraint, not an in-process lock,
    /// so it holds across server instances.
    async fn append_history_if_absent(
        &self,
        user_id: Uuid,
        movie_id: &str,
        watched_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    preferred_genres: Vec<String>,
    preferred_actors: Vec<String>,
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    movie_id: String,
    watched_at: DateTime<Utc>,
}

#[async_trait::async_trait]
impl ProfileStore for PgProfileStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Uuid> {
        let user_id = Uuid::new_v4();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user_id),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                AppError::InvalidInput("Username or email already in use.".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_credentials(&self, email: &str) -> AppResult<Option<Credentials>> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(user_id, password_hash)| Credentials {
            user_id,
            password_hash,
        }))
    }

    async fn get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, preferred_genres, preferred_actors
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let history = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT movie_id, watched_at
            FROM watch_history
            WHERE user_id = $1
            ORDER BY watched_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            preferences: Preferences {
                genres: user.preferred_genres,
                actors: user.preferred_actors,
            },
            history: history
                .into_iter()
                .map(|row| HistoryEntry {
                    movie_id: row.movie_id,
                    watched_at: row.watched_at,
                })
                .collect(),
        }))
    }

    async fn update_preferences(
        &self,
        user_id: Uuid,
        genres: Option<Vec<String>>,
        actors: Option<Vec<String>>,
    ) -> AppResult<Preferences> {
        let row: Option<(Vec<String>, Vec<String>)> = sqlx::query_as(
            r#"
            UPDATE users
            SET preferred_genres = COALESCE($2, preferred_genres),
                preferred_actors = COALESCE($3, preferred_actors)
            WHERE id = $1
            RETURNING preferred_genres, preferred_actors
            "#,
        )
        .bind(user_id)
        .bind(genres)
        .bind(actors)
        .fetch_optional(&self.pool)
        .await?;

        let (genres, actors) =
            row.ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        Ok(Preferences { genres, actors })
    }

    async fn append_history_if_absent(
        &self,
        user_id: Uuid,
        movie_id: &str,
        watched_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        // The (user_id, movie_id) primary key makes this a store-level
        // conditional append; concurrent duplicates lose the race cleanly.
        let result = sqlx::query(
            r#"
            INSERT INTO watch_history (user_id, movie_id, watched_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(watched_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
