//! Movie metadata provider abstraction
//!
//! The catalog is populated out of band from an external metadata source;
//! this seam keeps the ingestion service independent of which provider backs
//! it and lets tests feed it canned pages.

use crate::{error::AppResult, models::Movie};

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// One page of popular movies, fully hydrated: genre names resolved,
    /// top-billed cast and director attached where credits are available.
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<Movie>>;
}
