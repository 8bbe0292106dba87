use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::queries,
    error::{AppError, AppResult},
    models::{DayBucket, MonthBucket},
    routes::AppState,
    services::trends,
};

/// Handler for the rolling 12-month trend, anchored at the current month.
pub async fn monthly(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<MonthBucket>>> {
    let movies = queries::movies_for_user(&state.db_pool, user_id).await?;
    let reviews = queries::reviewed_movies_for_user(&state.db_pool, user_id).await?;

    Ok(Json(trends::monthly_trend(&movies, &reviews, Utc::now())))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    year: i32,
    month: u32,
}

/// Handler for the single-month calendar view.
pub async fn calendar(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<CalendarQuery>,
) -> AppResult<Json<Vec<DayBucket>>> {
    if !(1..=12).contains(&params.month) {
        return Err(AppError::InvalidInput(format!(
            "Month must be 1-12, got {}",
            params.month
        )));
    }

    let movies = queries::movies_for_user(&state.db_pool, user_id).await?;
    Ok(Json(trends::calendar_month(
        &movies,
        params.year,
        params.month,
    )))
}
