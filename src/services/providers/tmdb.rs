use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        parse_release_year, Movie, TmdbCredits, TmdbGenreList, TmdbMovie, TmdbMovieDetails,
        TmdbPage, UNKNOWN_DIRECTOR,
    },
    services::providers::MetadataProvider,
};

const LANGUAGE: &str = "en-US";

/// TMDB-backed metadata provider.
///
/// Popular-page entries carry only genre ids; credits live behind a
/// per-movie details call. A failed credits lookup degrades that one movie
/// to no cast and the director sentinel rather than failing the page.
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn genre_names(&self) -> AppResult<HashMap<u64, String>> {
        let url = format!("{}/genre/movie/list", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB genre list returned status {}",
                status
            )));
        }

        let list: TmdbGenreList = response.json().await?;
        Ok(list
            .genres
            .into_iter()
            .map(|genre| (genre.id, genre.name))
            .collect())
    }

    /// Credits for one movie, `None` when the lookup fails for any reason
    async fn movie_credits(&self, movie_id: u64) -> Option<TmdbCredits> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
                ("append_to_response", "credits"),
            ])
            .send()
            .await;

        let details: TmdbMovieDetails = match response {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!(movie_id, error = %e, "Malformed TMDB credits payload");
                    return None;
                }
            },
            Ok(resp) => {
                tracing::warn!(movie_id, status = %resp.status(), "TMDB credits lookup failed");
                return None;
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "TMDB credits request failed");
                return None;
            }
        };

        details.credits
    }
}

/// Assembles a catalog movie from a popular-page entry, resolved genre
/// names, and optionally-present credits.
fn assemble_movie(
    entry: TmdbMovie,
    genre_names: &HashMap<u64, String>,
    credits: Option<&TmdbCredits>,
) -> Movie {
    let genres = entry
        .genre_ids
        .iter()
        .filter_map(|id| genre_names.get(id).cloned())
        .collect();

    let (actors, director) = match credits {
        Some(credits) => (credits.top_cast(), credits.director()),
        None => (Vec::new(), UNKNOWN_DIRECTOR.to_string()),
    };

    Movie {
        id: entry.id.to_string(),
        title: entry.title,
        genres,
        actors,
        director,
        release_year: parse_release_year(entry.release_date.as_deref()),
        description: entry.overview.unwrap_or_default(),
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<Movie>> {
        let genre_names = self.genre_names().await?;

        let url = format!("{}/movie/popular", self.api_url);
        let page_param = page.to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB popular movies returned status {}",
                status
            )));
        }

        let page_data: TmdbPage = response.json().await?;

        let mut movies = Vec::with_capacity(page_data.results.len());
        for entry in page_data.results {
            let credits = self.movie_credits(entry.id).await;
            movies.push(assemble_movie(entry, &genre_names, credits.as_ref()));
        }

        tracing::info!(page, movies = movies.len(), "TMDB page fetched");

        Ok(movies)
    }
}
