use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::{
    auth::TokenIssuer,
    config::Config,
    db::{CatalogStore, PgCatalogStore, PgProfileStore, ProfileStore},
    error::AppResult,
    services::{
        providers::{MetadataProvider, TmdbProvider},
        SuggestionEnricher,
    },
};

/// Shared application state: every collaborator behind its seam, built once
/// at startup from [`Config`] and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub metadata: Arc<dyn MetadataProvider>,
    pub enricher: Arc<SuggestionEnricher>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        profiles: Arc<dyn ProfileStore>,
        metadata: Arc<dyn MetadataProvider>,
        enricher: SuggestionEnricher,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            catalog,
            profiles,
            metadata,
            enricher: Arc::new(enricher),
            tokens: Arc::new(tokens),
        }
    }

    /// Wires the production collaborators: Postgres stores, the TMDB
    /// provider, and the Hugging Face enricher.
    pub fn from_config(config: &Config, pool: PgPool) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        Ok(Self::new(
            Arc::new(PgCatalogStore::new(pool.clone())),
            Arc::new(PgProfileStore::new(pool)),
            Arc::new(TmdbProvider::new(
                config.tmdb_api_key.clone(),
                config.tmdb_api_url.clone(),
                timeout,
            )?),
            SuggestionEnricher::new(
                config.hf_api_key.clone(),
                config.hf_api_url.clone(),
                timeout,
            )?,
            TokenIssuer::new(config.jwt_secret.clone(), config.jwt_expiry_secs),
        ))
    }
}
