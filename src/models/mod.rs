use serde::{Deserialize, Serialize};

pub mod user;

pub use user::{Credentials, HistoryEntry, Preferences, UserProfile};

/// Sentinel director name when TMDB credits carry no director entry
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Number of top-billed cast members kept per movie
pub const TOP_CAST: usize = 5;

/// A catalog movie, keyed by the metadata provider's stable external id.
///
/// Created once by the ingestion job and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genres: Vec<String>,
    /// Top-billed cast, in billing order
    pub actors: Vec<String>,
    pub director: String,
    /// 0 when the provider's release date was absent or unparseable
    pub release_year: i32,
    pub description: String,
}

/// Client-facing projection of a movie used in suggestion responses.
///
/// The id is kept so the client can log the movie as watched; descriptions
/// and director stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub release_year: i32,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            actors: movie.actors.clone(),
            release_year: movie.release_year,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One entry from GET /movie/popular
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    pub results: Vec<TmdbMovie>,
}

/// GET /movie/{id}?append_to_response=credits
///
/// Credits are an explicit optional: TMDB omits the object entirely when the
/// append fails, and absence must not be conflated with an empty cast.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    pub genres: Vec<TmdbGenre>,
}

/// Parses a release year out of TMDB's `YYYY-MM-DD` date, 0 when unparseable
pub fn parse_release_year(release_date: Option<&str>) -> i32 {
    release_date
        .and_then(|date| date.split('-').next())
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}

impl TmdbCredits {
    /// Top-billed cast names, in billing order
    pub fn top_cast(&self) -> Vec<String> {
        self.cast
            .iter()
            .take(TOP_CAST)
            .map(|member| member.name.clone())
            .collect()
    }

    /// First crew member credited as director, or the sentinel
    pub fn director(&self) -> String {
        self.crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.clone())
            .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_summary_drops_description() {
        let movie = Movie {
            id: "603".to_string(),
            title: "The Matrix".to_string(),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            actors: vec!["Keanu Reeves".to_string()],
            director: "Lana Wachowski".to_string(),
            release_year: 1999,
            description: "A hacker learns the truth.".to_string(),
        };

        let summary = MovieSummary::from(&movie);
        assert_eq!(summary.id, "603");
        assert_eq!(summary.title, "The Matrix");
        assert_eq!(summary.release_year, 1999);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("director").is_none());
    }

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year(Some("1999-03-31")), 1999);
        assert_eq!(parse_release_year(Some("2010")), 2010);
        assert_eq!(parse_release_year(Some("")), 0);
        assert_eq!(parse_release_year(Some("unknown")), 0);
        assert_eq!(parse_release_year(None), 0);
    }

    #[test]
    fn test_top_cast_keeps_billing_order_and_cap() {
        let credits = TmdbCredits {
            cast: (1..=8)
                .map(|i| TmdbCastMember {
                    name: format!("Actor {}", i),
                })
                .collect(),
            crew: vec![],
        };

        let cast = credits.top_cast();
        assert_eq!(cast.len(), TOP_CAST);
        assert_eq!(cast[0], "Actor 1");
        assert_eq!(cast[4], "Actor 5");
    }

    #[test]
    fn test_director_falls_back_to_sentinel() {
        let credits = TmdbCredits {
            cast: vec![],
            crew: vec![TmdbCrewMember {
                name: "Jane Doe".to_string(),
                job: "Producer".to_string(),
            }],
        };
        assert_eq!(credits.director(), UNKNOWN_DIRECTOR);

        let credits = TmdbCredits {
            cast: vec![],
            crew: vec![
                TmdbCrewMember {
                    name: "Jane Doe".to_string(),
                    job: "Producer".to_string(),
                },
                TmdbCrewMember {
                    name: "John Smith".to_string(),
                    job: "Director".to_string(),
                },
            ],
        };
        assert_eq!(credits.director(), "John Smith");
    }
}
