//! Read-only row fetchers for the analytics computations, plus the single
//! write this service owns (the watch-goal upsert). Every query is scoped
//! by owning-user id or is an explicitly public aggregate input.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProfileEngagement, PublicReview, ReviewedMovie, WatchGoal, WatchedMovie},
};

/// All movies a user has logged, oldest first.
pub async fn movies_for_user(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<WatchedMovie>> {
    let movies = sqlx::query_as::<_, WatchedMovie>(
        r#"
        SELECT id, user_id, tmdb_id, title, genres, poster_path, release_date, runtime, created_at
        FROM movies
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(movies)
}

/// A user's reviews joined with each movie's genre/runtime fields, oldest
/// first. Input shape for the aggregate and trend computations.
pub async fn reviewed_movies_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> AppResult<Vec<ReviewedMovie>> {
    let reviews = sqlx::query_as::<_, ReviewedMovie>(
        r#"
        SELECT r.rating, r.tags, r.watched_date, r.created_at, m.title, m.genres, m.runtime
        FROM reviews r
        JOIN movies m ON m.id = r.movie_id
        WHERE r.user_id = $1
        ORDER BY r.created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Reviews watched inside one calendar year, the annual-stats input.
pub async fn reviewed_movies_for_year(
    pool: &PgPool,
    user_id: Uuid,
    year: i32,
) -> AppResult<Vec<ReviewedMovie>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);

    let reviews = sqlx::query_as::<_, ReviewedMovie>(
        r#"
        SELECT r.rating, r.tags, r.watched_date, r.created_at, m.title, m.genres, m.runtime
        FROM reviews r
        JOIN movies m ON m.id = r.movie_id
        WHERE r.user_id = $1 AND r.watched_date >= $2 AND r.watched_date <= $3
        ORDER BY r.created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Number of movies the user logged during one calendar year, the
/// watch-goal progress numerator.
pub async fn movies_logged_in_year(pool: &PgPool, user_id: Uuid, year: i32) -> AppResult<i64> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1);

    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM movies
        WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// The user's watch goal for one year, if set.
pub async fn watch_goal(pool: &PgPool, user_id: Uuid, year: i32) -> AppResult<Option<WatchGoal>> {
    let goal = sqlx::query_as::<_, WatchGoal>(
        r#"
        SELECT id, user_id, year, target_movies
        FROM watch_goals
        WHERE user_id = $1 AND year = $2
        "#,
    )
    .bind(user_id)
    .bind(year)
    .fetch_optional(pool)
    .await?;

    Ok(goal)
}

/// Insert-or-update of the single (user, year) goal row.
pub async fn upsert_watch_goal(
    pool: &PgPool,
    user_id: Uuid,
    year: i32,
    target_movies: i32,
) -> AppResult<WatchGoal> {
    let goal = sqlx::query_as::<_, WatchGoal>(
        r#"
        INSERT INTO watch_goals (id, user_id, year, target_movies)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, year)
        DO UPDATE SET target_movies = EXCLUDED.target_movies
        RETURNING id, user_id, year, target_movies
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(year)
    .bind(target_movies)
    .fetch_one(pool)
    .await?;

    Ok(goal)
}

/// Ids of every user the given user follows.
pub async fn following_ids(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<Uuid>> {
    let ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT following_id
        FROM follows
        WHERE follower_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Every profile joined with its public-review and follower counts, the
/// follow-suggestion input.
pub async fn profile_engagement(pool: &PgPool) -> AppResult<Vec<ProfileEngagement>> {
    let profiles = sqlx::query_as::<_, ProfileEngagement>(
        r#"
        SELECT p.id, p.username, p.avatar_url,
               COUNT(DISTINCT r.id) FILTER (WHERE r.is_public) AS review_count,
               COUNT(DISTINCT f.follower_id) AS followers_count
        FROM profiles p
        LEFT JOIN reviews r ON r.user_id = p.id
        LEFT JOIN follows f ON f.following_id = p.id
        GROUP BY p.id, p.username, p.avatar_url
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// Every public review joined with its movie's catalog identity, the
/// community top-rated input.
pub async fn public_reviews(pool: &PgPool) -> AppResult<Vec<PublicReview>> {
    let reviews = sqlx::query_as::<_, PublicReview>(
        r#"
        SELECT m.tmdb_id, m.title, m.poster_path, r.rating
        FROM reviews r
        JOIN movies m ON m.id = r.movie_id
        WHERE r.is_public = true
        ORDER BY r.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}
