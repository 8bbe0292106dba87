//! Frequency and statistical summaries over watched movies and reviews.
//!
//! Everything in this module is a pure fold over its input rows into an
//! ordered map or summary value. Ordering for display is the ranker's job;
//! the maps here only guarantee deterministic (key-ascending) iteration.

use std::collections::BTreeMap;

use crate::models::{RatingSummary, ReviewedMovie, WatchedMovie};

/// Weight a review contributes to its movie's genres when deriving
/// preference signals: generous ratings count double, middling ratings
/// count once, low ratings still count a little.
pub fn rating_weight(rating: i16) -> f64 {
    if rating >= 4 {
        2.0
    } else if rating >= 3 {
        1.0
    } else {
        0.5
    }
}

/// Plain watch-history genre counting: +1 per genre per logged movie.
pub fn genre_watch_counts(movies: &[WatchedMovie]) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for movie in movies {
        for genre in &movie.genres {
            *counts.entry(genre.clone()).or_insert(0.0) += 1.0;
        }
    }
    counts
}

/// Rating-weighted genre scores derived from reviews.
pub fn genre_preference_scores(reviews: &[ReviewedMovie]) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for review in reviews {
        let weight = rating_weight(review.rating);
        for genre in &review.genres {
            *scores.entry(genre.clone()).or_insert(0.0) += weight;
        }
    }
    scores
}

/// Combined genre affinity: watch counts plus rating-weighted review scores.
/// This is the signal the recommendation scorer ranks genres by.
pub fn genre_affinity(
    movies: &[WatchedMovie],
    reviews: &[ReviewedMovie],
) -> BTreeMap<String, f64> {
    let mut affinity = genre_watch_counts(movies);
    for (genre, score) in genre_preference_scores(reviews) {
        *affinity.entry(genre).or_insert(0.0) += score;
    }
    affinity
}

/// Tag frequency over reviews: +1 per tag occurrence, no rating weighting.
/// Reviews without tags contribute nothing.
pub fn tag_counts(reviews: &[ReviewedMovie]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for review in reviews {
        if let Some(tags) = &review.tags {
            for tag in tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Average rating and best-rated selection over a review set.
///
/// The average of an empty set is 0.0, never NaN. The best-rated entry is
/// the first review holding the maximum rating (first occurrence wins).
pub fn rating_summary(reviews: &[ReviewedMovie]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary {
            count: 0,
            average: 0.0,
            best_title: None,
            best_rating: None,
        };
    }

    let sum: i64 = reviews.iter().map(|r| r.rating as i64).sum();
    let average = sum as f64 / reviews.len() as f64;

    let mut best = &reviews[0];
    for review in &reviews[1..] {
        if review.rating > best.rating {
            best = review;
        }
    }

    RatingSummary {
        count: reviews.len() as u64,
        average,
        best_title: Some(best.title.clone()),
        best_rating: Some(best.rating),
    }
}
