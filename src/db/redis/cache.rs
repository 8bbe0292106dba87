use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::error::AppResult;

/// Keys for cached catalog responses. Page-scoped keys embed the page
/// number so different pages never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Search(String, u32),
    Popular(u32),
    NowPlaying(u32),
    Details(i64),
    ByProvider(i64, u32),
    ByGenre(i64, u32),
    GenreList,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Search(query, page) => {
                write!(f, "catalog:search:{}:p{}", query.to_lowercase(), page)
            }
            CacheKey::Popular(page) => write!(f, "catalog:popular:p{}", page),
            CacheKey::NowPlaying(page) => write!(f, "catalog:nowplaying:p{}", page),
            CacheKey::Details(id) => write!(f, "catalog:details:{}", id),
            CacheKey::ByProvider(id, page) => write!(f, "catalog:provider:{}:p{}", id, page),
            CacheKey::ByGenre(id, page) => write!(f, "catalog:genre:{}:p{}", id, page),
            CacheKey::GenreList => write!(f, "catalog:genres"),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Message for asynchronous cache writes
struct CacheWriteMessage {
    key: String,
    value: String,
    ttl: u64,
}

/// Cache handler for storing and retrieving data from Redis
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    write_tx: mpsc::UnboundedSender<CacheWriteMessage>,
}

/// Handle for gracefully shutting down the cache writer
pub struct CacheWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl CacheWriterHandle {
    /// Signals the writer task to flush pending writes and stop.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Cache writer shutdown signal sent");
    }
}

impl Cache {
    /// Creates a new Cache instance with an async write background task
    ///
    /// Cache writes go through a background task so a slow Redis never
    /// blocks an API response.
    pub async fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let client = redis_client.clone();
        tokio::spawn(async move {
            Self::cache_writer_task(client, write_rx, shutdown_rx).await;
        });

        let cache = Self {
            redis_client,
            write_tx,
        };

        let handle = CacheWriterHandle { shutdown_tx };

        (cache, handle)
    }

    /// Background task that processes cache write messages. On shutdown it
    /// drains whatever is still queued before exiting.
    async fn cache_writer_task(
        client: Client,
        mut write_rx: mpsc::UnboundedReceiver<CacheWriteMessage>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("Cache writer task started");

        loop {
            tokio::select! {
                Some(msg) = write_rx.recv() => {
                    if let Err(e) = Self::write_to_redis(&client, msg).await {
                        tracing::error!(error = %e, "Failed to write to Redis cache");
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Cache writer shutting down, flushing remaining writes");

                    while let Ok(msg) = write_rx.try_recv() {
                        if let Err(e) = Self::write_to_redis(&client, msg).await {
                            tracing::error!(error = %e, "Failed to flush cache write during shutdown");
                        }
                    }

                    tracing::info!("Cache writer task stopped");
                    break;
                }
            }
        }
    }

    /// Writes a single message to Redis
    async fn write_to_redis(client: &Client, msg: CacheWriteMessage) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(msg.key, msg.value, msg.ttl).await?;
        Ok(())
    }

    /// Retrieves a value from the cache by key, `None` on a miss.
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(format!("{}", key)).await?;

        match cached {
            Some(json) => {
                let data = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value in the cache asynchronously without blocking
    ///
    /// Serializes the value and hands it to the background writer; the
    /// actual Redis write happens later. Use when the caller does not need
    /// confirmation that the write landed.
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let msg = CacheWriteMessage {
            key: format!("{}", key),
            value: json,
            ttl,
        };

        if let Err(e) = self.write_tx.send(msg) {
            tracing::error!(error = %e, "Failed to send cache write message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_display_search_lowercases_query() {
        let key = CacheKey::Search("Oldboy".to_string(), 1);
        assert_eq!(format!("{}", key), "catalog:search:oldboy:p1");
    }

    #[test]
    fn test_cache_key_display_pages_are_distinct() {
        let page1 = CacheKey::ByGenre(18, 1);
        let page2 = CacheKey::ByGenre(18, 2);
        assert_ne!(format!("{}", page1), format!("{}", page2));
        assert_eq!(format!("{}", page1), "catalog:genre:18:p1");
    }

    #[test]
    fn test_cache_key_display_details() {
        let key = CacheKey::Details(27205);
        assert_eq!(format!("{}", key), "catalog:details:27205");
    }

    #[test]
    fn test_cache_key_display_genre_list() {
        assert_eq!(format!("{}", CacheKey::GenreList), "catalog:genres");
    }

    #[tokio::test]
    async fn test_cache_roundtrip_against_local_redis() {
        // Needs a running Redis; skipped environments point REDIS_URL elsewhere
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let client = match create_redis_client(&redis_url) {
            Ok(c) => c,
            Err(_) => return,
        };
        if client.get_multiplexed_async_connection().await.is_err() {
            return;
        }

        let (cache, _handle) = Cache::new(client.clone()).await;

        let key = CacheKey::Search("cache_roundtrip_test".to_string(), 1);
        let value = vec!["item1".to_string(), "item2".to_string()];

        cache.set_in_background(&key, &value, 60);
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let retrieved: Option<Vec<String>> = cache.get_from_cache(&key).await.unwrap();
        assert_eq!(retrieved, Some(value));

        let mut conn = client.get_multiplexed_async_connection().await.unwrap();
        let _: () = conn.del(format!("{}", key)).await.unwrap();
    }
}
