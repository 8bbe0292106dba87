use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::queries,
    error::AppResult,
    models::{SuggestedFollower, TopRatedMovie},
    routes::AppState,
    services::social,
};

/// Handler for follow suggestions: profiles the user does not already
/// follow, ranked by engagement.
pub async fn suggested_follows(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<SuggestedFollower>>> {
    let mut excluded: HashSet<Uuid> = queries::following_ids(&state.db_pool, user_id)
        .await?
        .into_iter()
        .collect();
    excluded.insert(user_id);

    let profiles = queries::profile_engagement(&state.db_pool).await?;
    Ok(Json(social::suggest_followers(&profiles, &excluded)))
}

#[derive(Debug, Deserialize)]
pub struct TopRatedQuery {
    limit: Option<usize>,
    min_reviews: Option<u64>,
}

/// Handler for community top-rated movies across public reviews.
pub async fn top_rated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopRatedQuery>,
) -> AppResult<Json<Vec<TopRatedMovie>>> {
    let limit = params.limit.unwrap_or(10);
    let min_reviews = params.min_reviews.unwrap_or(3);

    let reviews = queries::public_reviews(&state.db_pool).await?;
    Ok(Json(social::top_rated(&reviews, min_reviews, limit)))
}
