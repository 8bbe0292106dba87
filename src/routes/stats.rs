use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::queries,
    error::AppResult,
    models::{AnnualStats, DecadeCount, GenreActivity, GenreScore, TagCount},
    routes::AppState,
    services::{aggregate, preferences::MAX_FAVORITE_GENRES, rank, trends},
};

const TOP_GENRE_LIMIT: usize = 5;
const TOP_TAG_LIMIT: usize = 8;

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub total_movies: u64,
    pub total_reviews: u64,
    pub average_rating: f64,
    pub top_genres: Vec<GenreActivity>,
    /// Rating-weighted affinity ranking, the signal recommendations use
    pub preferred_genres: Vec<GenreScore>,
    pub top_tags: Vec<TagCount>,
    pub decades: Vec<DecadeCount>,
}

/// Handler for a user's lifetime stats: totals, average rating, top genres
/// by plain watch count, top tags, release-decade distribution.
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserStatsResponse>> {
    let movies = queries::movies_for_user(&state.db_pool, user_id).await?;
    let reviews = queries::reviewed_movies_for_user(&state.db_pool, user_id).await?;

    let summary = aggregate::rating_summary(&reviews);

    let watch_counts = aggregate::genre_watch_counts(&movies);
    let top_genres = rank::top_n(&watch_counts, TOP_GENRE_LIMIT)
        .into_iter()
        .map(|(name, count)| GenreActivity {
            name,
            count: count as u64,
        })
        .collect();

    let affinity = aggregate::genre_affinity(&movies, &reviews);
    let preferred_genres = rank::top_n(&affinity, MAX_FAVORITE_GENRES)
        .into_iter()
        .map(|(name, score)| GenreScore {
            count: watch_counts.get(&name).copied().unwrap_or(0.0) as u64,
            name,
            score,
        })
        .collect();

    let top_tags = rank::top_n(&aggregate::tag_counts(&reviews), TOP_TAG_LIMIT)
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();

    let decades = trends::release_decades(&movies)
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect();

    Ok(Json(UserStatsResponse {
        total_movies: movies.len() as u64,
        total_reviews: summary.count,
        average_rating: summary.average,
        top_genres,
        preferred_genres,
        top_tags,
        decades,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnnualQuery {
    year: Option<i32>,
}

/// Handler for the calendar-year summary; defaults to the current year.
pub async fn annual(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<AnnualQuery>,
) -> AppResult<Json<AnnualStats>> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());

    let reviews = queries::reviewed_movies_for_year(&state.db_pool, user_id, year).await?;
    Ok(Json(trends::annual_stats(&reviews, year)))
}
