//! Favorite-genre preference storage.
//!
//! The recommendation scorer prefers genre signals derived from watch
//! history; this store is the fallback when a user has no history yet. It
//! holds the user's last explicit choice of up to three catalog genre ids.

use redis::AsyncCommands;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Upper bound on stored favorite genres ("max 3 favorite genres" rule)
pub const MAX_FAVORITE_GENRES: usize = 3;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The user's saved favorite genre ids, `None` when never saved.
    async fn favorite_genres(&self, user_id: Uuid) -> AppResult<Option<Vec<i64>>>;

    /// Persists the user's favorite genre ids, truncating to the cap.
    async fn save_favorite_genres(&self, user_id: Uuid, genre_ids: Vec<i64>) -> AppResult<()>;
}

/// Redis-backed preference store. Keys have no expiry; a saved choice
/// stays valid until the user replaces it.
pub struct RedisPreferenceStore {
    redis_client: redis::Client,
}

impl RedisPreferenceStore {
    pub fn new(redis_client: redis::Client) -> Self {
        Self { redis_client }
    }

    fn key(user_id: Uuid) -> String {
        format!("prefs:genres:{}", user_id)
    }
}

#[async_trait::async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn favorite_genres(&self, user_id: Uuid) -> AppResult<Option<Vec<i64>>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(Self::key(user_id)).await?;

        match stored {
            Some(json) => {
                let genre_ids: Vec<i64> = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Preference deserialization error: {}", e))
                })?;
                Ok(Some(genre_ids))
            }
            None => Ok(None),
        }
    }

    async fn save_favorite_genres(&self, user_id: Uuid, genre_ids: Vec<i64>) -> AppResult<()> {
        let capped: Vec<i64> = genre_ids.into_iter().take(MAX_FAVORITE_GENRES).collect();
        let json = serde_json::to_string(&capped)
            .map_err(|e| AppError::Internal(format!("Preference serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(Self::key(user_id), json).await?;

        tracing::debug!(user_id = %user_id, genres = ?capped, "Saved favorite genres");

        Ok(())
    }
}
