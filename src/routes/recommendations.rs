use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::ScoredCandidate,
    routes::AppState,
    services::{preferences::MAX_FAVORITE_GENRES, recommend},
};

/// Handler for personalized recommendations.
///
/// Responds 422 when the user has neither watch history nor saved genre
/// preferences, so the client knows to prompt for an explicit choice
/// instead of rendering an empty state.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<ScoredCandidate>>> {
    let ranked = recommend::recommend_for_user(
        &state.db_pool,
        state.catalog.clone(),
        state.preferences.clone(),
        user_id,
    )
    .await?;

    Ok(Json(ranked))
}

#[derive(Debug, Deserialize)]
pub struct SaveGenresRequest {
    pub genre_ids: Vec<i64>,
}

/// Handler for saving an explicit favorite-genre choice (up to 3).
pub async fn save_genres(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SaveGenresRequest>,
) -> AppResult<StatusCode> {
    if request.genre_ids.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one genre id is required".to_string(),
        ));
    }
    if request.genre_ids.len() > MAX_FAVORITE_GENRES {
        return Err(AppError::InvalidInput(format!(
            "At most {} favorite genres are allowed",
            MAX_FAVORITE_GENRES
        )));
    }

    state
        .preferences
        .save_favorite_genres(user_id, request.genre_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
