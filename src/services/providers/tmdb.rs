/// TMDB catalog provider
///
/// Talks to the TMDB v3 API over HTTPS and caches responses in Redis.
/// Each trait method maps to one upstream endpoint:
///
/// 1. search        -> /search/movie
/// 2. popular       -> /movie/popular
/// 3. now_playing   -> /movie/now_playing (region-scoped)
/// 4. details       -> /movie/{id}
/// 5. by_provider   -> /discover/movie?with_watch_providers=
/// 6. by_genre      -> /discover/movie?with_genres=
/// 7. genres        -> /genre/movie/list
///
/// Upstream non-2xx responses map to `AppError::ExternalApi` with the
/// status and body; no partial pages are fabricated.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::catalog::{CatalogGenre, CatalogMovieDetails, CatalogPage, GenreListResponse},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const PAGE_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 604800; // 1 week
const GENRES_CACHE_TTL: u64 = 86400; // 1 day

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    region: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        language: String,
        region: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
            region,
            cache,
        }
    }

    /// Issues one GET against the catalog and deserializes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&[("language", self.language.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let value = response.json::<T>().await?;
        Ok(value)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::Search(query.to_string(), page),
            SEARCH_CACHE_TTL,
            async move {
                let result: CatalogPage = self
                    .get_json(
                        "/search/movie",
                        &[("query", query.to_string()), ("page", page.to_string())],
                    )
                    .await?;

                tracing::info!(
                    query = %query,
                    page = page,
                    results = result.results.len(),
                    provider = "tmdb",
                    "Catalog search completed"
                );

                Ok::<_, AppError>(result)
            }
        )
    }

    async fn popular(&self, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::Popular(page),
            PAGE_CACHE_TTL,
            async move {
                self.get_json("/movie/popular", &[("page", page.to_string())])
                    .await
            }
        )
    }

    async fn now_playing(&self, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::NowPlaying(page),
            PAGE_CACHE_TTL,
            async move {
                self.get_json(
                    "/movie/now_playing",
                    &[
                        ("page", page.to_string()),
                        ("region", self.region.clone()),
                    ],
                )
                .await
            }
        )
    }

    async fn details(&self, tmdb_id: i64) -> AppResult<CatalogMovieDetails> {
        cached!(
            self.cache,
            CacheKey::Details(tmdb_id),
            DETAILS_CACHE_TTL,
            async move {
                let details: CatalogMovieDetails = self
                    .get_json(&format!("/movie/{}", tmdb_id), &[])
                    .await?;

                tracing::info!(
                    tmdb_id = tmdb_id,
                    provider = "tmdb",
                    "Catalog details fetched"
                );

                Ok::<_, AppError>(details)
            }
        )
    }

    async fn by_provider(&self, provider_id: i64, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::ByProvider(provider_id, page),
            PAGE_CACHE_TTL,
            async move {
                self.get_json(
                    "/discover/movie",
                    &[
                        ("with_watch_providers", provider_id.to_string()),
                        ("watch_region", self.region.clone()),
                        ("page", page.to_string()),
                        ("sort_by", "popularity.desc".to_string()),
                    ],
                )
                .await
            }
        )
    }

    async fn by_genre(&self, genre_id: i64, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::ByGenre(genre_id, page),
            PAGE_CACHE_TTL,
            async move {
                let result: CatalogPage = self
                    .get_json(
                        "/discover/movie",
                        &[
                            ("with_genres", genre_id.to_string()),
                            ("page", page.to_string()),
                            ("sort_by", "popularity.desc".to_string()),
                        ],
                    )
                    .await?;

                tracing::info!(
                    genre_id = genre_id,
                    page = page,
                    results = result.results.len(),
                    provider = "tmdb",
                    "Genre discover completed"
                );

                Ok::<_, AppError>(result)
            }
        )
    }

    async fn genres(&self) -> AppResult<Vec<CatalogGenre>> {
        cached!(
            self.cache,
            CacheKey::GenreList,
            GENRES_CACHE_TTL,
            async move {
                let list: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;
                Ok::<_, AppError>(list.genres)
            }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
