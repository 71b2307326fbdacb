use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored genre/actor preference sets
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// One watch-history entry. Insertion order is viewing order; the store
/// guarantees a movie id appears at most once per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub movie_id: String,
    pub watched_at: DateTime<Utc>,
}

/// A user's profile as seen by the recommendation core.
///
/// The password hash never leaves the profile store; see [`Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub preferences: Preferences,
    pub history: Vec<HistoryEntry>,
}

impl UserProfile {
    /// Every watched movie id, used to exclude candidates regardless of
    /// when the movie was watched
    pub fn watched_movie_ids(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|entry| entry.movie_id.clone())
            .collect()
    }
}

/// Login lookup result: just enough to verify a password and mint a token
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
}
