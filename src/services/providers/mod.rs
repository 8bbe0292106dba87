/// Movie catalog provider abstraction
///
/// One trait method per upstream catalog action (search, popular,
/// now-playing, details-by-id, by-provider, by-genre, list-genres). Keeping
/// the surface behind a trait lets route handlers and the recommendation
/// scorer run against a mock in tests while the concrete HTTP and caching
/// concerns live in one place.
use crate::{
    error::AppResult,
    models::catalog::{CatalogGenre, CatalogMovieDetails, CatalogPage},
};

pub mod tmdb;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Free-text title search
    async fn search(&self, query: &str, page: u32) -> AppResult<CatalogPage>;

    /// Currently popular movies
    async fn popular(&self, page: u32) -> AppResult<CatalogPage>;

    /// Movies now playing in theaters (region-scoped)
    async fn now_playing(&self, page: u32) -> AppResult<CatalogPage>;

    /// Full detail record for a single movie
    async fn details(&self, tmdb_id: i64) -> AppResult<CatalogMovieDetails>;

    /// Discover movies available on a streaming provider
    async fn by_provider(&self, provider_id: i64, page: u32) -> AppResult<CatalogPage>;

    /// Discover movies in a genre, sorted by popularity upstream
    async fn by_genre(&self, genre_id: i64, page: u32) -> AppResult<CatalogPage>;

    /// The catalog's genre id/name list
    async fn genres(&self) -> AppResult<Vec<CatalogGenre>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
