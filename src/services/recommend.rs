//! Personalized recommendation scoring.
//!
//! Pipeline: derive the user's genre affinity from history, resolve it to
//! up to three catalog genre ids (falling back to the saved explicit
//! choice), fetch one candidate page per genre concurrently, then merge,
//! dedup, drop already-watched ids, score, and rank.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::queries,
    error::{AppError, AppResult},
    models::{catalog::CatalogGenre, catalog::CatalogMovie, ScoredCandidate},
    services::{
        aggregate,
        preferences::{PreferenceStore, MAX_FAVORITE_GENRES},
        providers::CatalogProvider,
        rank,
    },
};

/// Display cap on the ranked candidate list
pub const RECOMMENDATION_LIMIT: usize = 15;

/// Users averaging at or above this rating get the acclaim boost applied
const GENEROUS_RATER_THRESHOLD: f64 = 4.0;
/// Candidates voted at or above this get the acclaim boost
const ACCLAIMED_VOTE_THRESHOLD: f64 = 7.0;
/// Flat bonus added when both thresholds hold
const ACCLAIM_BONUS: f64 = 2.0;

/// Maps the top-affinity genre names to catalog genre ids, keeping rank
/// order. Names with no catalog counterpart are dropped.
pub fn preferred_genre_ids(
    affinity: &BTreeMap<String, f64>,
    catalog_genres: &[CatalogGenre],
) -> Vec<i64> {
    rank::top_n_keys(affinity, MAX_FAVORITE_GENRES)
        .into_iter()
        .filter_map(|name| {
            catalog_genres
                .iter()
                .find(|g| g.name == name)
                .map(|g| g.id)
        })
        .collect()
}

/// Concatenates candidate pages in genre order and drops duplicate catalog
/// ids, keeping the first occurrence.
pub fn merge_candidates(pages: Vec<Vec<CatalogMovie>>) -> Vec<CatalogMovie> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for page in pages {
        for movie in page {
            if seen.insert(movie.id) {
                merged.push(movie);
            }
        }
    }
    merged
}

/// Scores, filters and ranks merged candidates.
///
/// Already-watched catalog ids are dropped entirely. Base score is the
/// candidate's vote average; generous raters (average >= 4) get a flat +2
/// on acclaimed candidates (vote average >= 7). The sort is stable, so
/// equal scores keep merge order; output is capped at the display limit.
pub fn score_candidates(
    candidates: Vec<CatalogMovie>,
    watched_ids: &HashSet<i64>,
    user_average_rating: f64,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|movie| !watched_ids.contains(&movie.id))
        .map(|movie| {
            let mut score = movie.vote_average;
            if user_average_rating >= GENEROUS_RATER_THRESHOLD
                && movie.vote_average >= ACCLAIMED_VOTE_THRESHOLD
            {
                score += ACCLAIM_BONUS;
            }
            ScoredCandidate {
                tmdb_id: movie.id,
                title: movie.title,
                poster_path: movie.poster_path,
                vote_average: movie.vote_average,
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(RECOMMENDATION_LIMIT);
    scored
}

/// Fetches the first candidate page for each preferred genre concurrently.
///
/// A failed fetch contributes no candidates but does not fail the others;
/// only when every fetch fails is the upstream error surfaced, so callers
/// can tell "catalog down" from "nothing matched".
pub async fn fetch_candidate_pages(
    catalog: Arc<dyn CatalogProvider>,
    genre_ids: &[i64],
) -> AppResult<Vec<Vec<CatalogMovie>>> {
    let mut tasks = Vec::new();

    for genre_id in genre_ids {
        let provider = catalog.clone();
        let genre_id = *genre_id;
        let task = tokio::spawn(async move { provider.by_genre(genre_id, 1).await });
        tasks.push((genre_id, task));
    }

    let mut pages = Vec::new();
    let mut errors = Vec::new();

    for (genre_id, task) in tasks {
        match task.await {
            Ok(Ok(page)) => pages.push(page.results),
            Ok(Err(e)) => {
                tracing::warn!(genre_id = genre_id, error = %e, "Genre candidate fetch failed");
                errors.push(e);
            }
            Err(e) => {
                tracing::error!(genre_id = genre_id, error = %e, "Task join error");
                errors.push(AppError::Internal(e.to_string()));
            }
        }
    }

    if !errors.is_empty() {
        tracing::warn!(
            success_count = pages.len(),
            error_count = errors.len(),
            "Partial candidate fetch failure"
        );
    }

    if pages.is_empty() && !errors.is_empty() {
        return Err(AppError::ExternalApi(
            "Failed to fetch candidates for any preferred genre".to_string(),
        ));
    }

    Ok(pages)
}

/// Resolves the user's preferred catalog genre ids by the priority rule:
/// history-derived affinity first, then the saved explicit choice, else a
/// `PreferencesRequired` signal telling the caller to prompt.
///
/// Freshly derived ids are saved back so they survive a history wipe.
pub async fn resolve_preferred_genres(
    affinity: &BTreeMap<String, f64>,
    catalog: &Arc<dyn CatalogProvider>,
    prefs: &Arc<dyn PreferenceStore>,
    user_id: Uuid,
) -> AppResult<Vec<i64>> {
    if !affinity.is_empty() {
        let catalog_genres = catalog.genres().await?;
        let derived = preferred_genre_ids(affinity, &catalog_genres);

        if !derived.is_empty() {
            if let Err(e) = prefs.save_favorite_genres(user_id, derived.clone()).await {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to persist derived genres");
            }
            return Ok(derived);
        }
    }

    match prefs.favorite_genres(user_id).await? {
        Some(saved) if !saved.is_empty() => {
            Ok(saved.into_iter().take(MAX_FAVORITE_GENRES).collect())
        }
        _ => Err(AppError::PreferencesRequired(
            "No watch history or saved favorite genres; choose up to 3 genres".to_string(),
        )),
    }
}

/// End-to-end recommendation run for one user.
pub async fn recommend_for_user(
    pool: &PgPool,
    catalog: Arc<dyn CatalogProvider>,
    prefs: Arc<dyn PreferenceStore>,
    user_id: Uuid,
) -> AppResult<Vec<ScoredCandidate>> {
    let movies = queries::movies_for_user(pool, user_id).await?;
    let reviews = queries::reviewed_movies_for_user(pool, user_id).await?;

    let affinity = aggregate::genre_affinity(&movies, &reviews);
    let genre_ids = resolve_preferred_genres(&affinity, &catalog, &prefs, user_id).await?;

    tracing::info!(
        user_id = %user_id,
        genres = ?genre_ids,
        history = movies.len(),
        "Fetching recommendation candidates"
    );

    let pages = fetch_candidate_pages(catalog, &genre_ids).await?;

    let watched_ids: HashSet<i64> = movies.iter().map(|m| m.tmdb_id).collect();
    let user_average = aggregate::rating_summary(&reviews).average;

    let candidates = merge_candidates(pages);
    let ranked = score_candidates(candidates, &watched_ids, user_average);

    tracing::info!(
        user_id = %user_id,
        candidates = ranked.len(),
        "Recommendations ranked"
    );

    Ok(ranked)
}
