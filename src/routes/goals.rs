use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::queries,
    error::{AppError, AppResult},
    models::{GoalProgress, WatchGoal},
    routes::AppState,
    services::goals,
};

#[derive(Debug, Deserialize)]
pub struct GoalQuery {
    year: Option<i32>,
}

/// Handler for watch-goal progress. Users without an explicit goal get the
/// default target so the progress card always renders.
pub async fn goal_progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<GoalQuery>,
) -> AppResult<Json<GoalProgress>> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());

    let target = queries::watch_goal(&state.db_pool, user_id, year)
        .await?
        .map(|goal| goal.target_movies)
        .unwrap_or(goals::DEFAULT_TARGET);

    let watched = queries::movies_logged_in_year(&state.db_pool, user_id, year).await?;

    Ok(Json(goals::progress(year, target, watched)))
}

#[derive(Debug, Deserialize)]
pub struct SetGoalRequest {
    pub year: i32,
    pub target_movies: i32,
}

/// Handler for setting a year's watch goal (insert-or-update).
pub async fn set_goal(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SetGoalRequest>,
) -> AppResult<Json<WatchGoal>> {
    if !(1..=1000).contains(&request.target_movies) {
        return Err(AppError::InvalidInput(format!(
            "Target must be 1-1000, got {}",
            request.target_movies
        )));
    }

    let goal = queries::upsert_watch_goal(
        &state.db_pool,
        user_id,
        request.year,
        request.target_movies,
    )
    .await?;

    tracing::info!(
        user_id = %user_id,
        year = goal.year,
        target = goal.target_movies,
        "Watch goal saved"
    );

    Ok(Json(goal))
}
