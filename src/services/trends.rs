//! Calendar-aligned bucketing of timestamped events.
//!
//! Every function takes an explicit reference date (or year/month) so that
//! identical inputs always produce identical buckets; no function reads the
//! clock itself.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::models::{
    AnnualStats, DayBucket, GenreActivity, Intensity, MonthActivity, MonthBucket, ReviewedMovie,
    WatchedMovie,
};

/// Steps a (year, month) pair back by `back` calendar months.
fn month_minus(year: i32, month: u32, back: u32) -> (i32, u32) {
    // Work in zero-based total months to avoid per-step underflow handling
    let total = year as i64 * 12 + (month as i64 - 1) - back as i64;
    (
        total.div_euclid(12) as i32,
        (total.rem_euclid(12) + 1) as u32,
    )
}

/// Number of days in a calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// Rolling 12-month trend ending at the month of `now`.
///
/// Buckets are fixed calendar months, oldest first. A movie or review
/// belongs to exactly one bucket, determined by its creation timestamp
/// (never by watched date). Months without activity still appear, zeroed.
pub fn monthly_trend(
    movies: &[WatchedMovie],
    reviews: &[ReviewedMovie],
    now: DateTime<Utc>,
) -> Vec<MonthBucket> {
    (0..12)
        .rev()
        .map(|back| {
            let (year, month) = month_minus(now.year(), now.month(), back);

            let movie_count = movies
                .iter()
                .filter(|m| m.created_at.year() == year && m.created_at.month() == month)
                .count() as u64;

            let month_reviews: Vec<&ReviewedMovie> = reviews
                .iter()
                .filter(|r| r.created_at.year() == year && r.created_at.month() == month)
                .collect();

            let avg_rating = if month_reviews.is_empty() {
                0.0
            } else {
                let sum: i64 = month_reviews.iter().map(|r| r.rating as i64).sum();
                sum as f64 / month_reviews.len() as f64
            };

            MonthBucket {
                label: format!("{:04}-{:02}", year, month),
                year,
                month,
                movies: movie_count,
                reviews: month_reviews.len() as u64,
                avg_rating,
            }
        })
        .collect()
}

/// One bucket per calendar day of the selected month, with the titles
/// logged that day and the step-function intensity class.
pub fn calendar_month(movies: &[WatchedMovie], year: i32, month: u32) -> Vec<DayBucket> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let titles: Vec<String> = movies
                .iter()
                .filter(|m| m.created_at.date_naive() == date)
                .map(|m| m.title.clone())
                .collect();

            let count = titles.len() as u64;
            DayBucket {
                date,
                count,
                titles,
                intensity: Intensity::from_count(count),
            }
        })
        .collect()
}

/// Calendar-year watching summary (Jan 1 - Dec 31 inclusive, by watched
/// date). Empty input yields zeroed totals with `None` selections rather
/// than an error.
///
/// Tie-breaks are explicit: most-active-month ties resolve to the earliest
/// month in Jan->Dec order, top-genre ties to the lexicographically first
/// genre, best-rated ties to the first review encountered.
pub fn annual_stats(reviews: &[ReviewedMovie], year: i32) -> AnnualStats {
    let in_year: Vec<&ReviewedMovie> = reviews
        .iter()
        .filter(|r| r.watched_date.map(|d| d.year() == year).unwrap_or(false))
        .collect();

    if in_year.is_empty() {
        return AnnualStats {
            year,
            total_movies: 0,
            total_runtime: 0,
            average_rating: 0.0,
            most_active_month: None,
            top_genre: None,
            best_rated_movie: None,
        };
    }

    let total_movies = in_year.len() as u64;
    let total_runtime: u64 = in_year
        .iter()
        .map(|r| r.runtime.unwrap_or(0).max(0) as u64)
        .sum();
    let rating_sum: i64 = in_year.iter().map(|r| r.rating as i64).sum();
    let average_rating = rating_sum as f64 / total_movies as f64;

    // Review count per watched month
    let mut month_counts = [0u64; 12];
    for review in &in_year {
        if let Some(date) = review.watched_date {
            month_counts[date.month0() as usize] += 1;
        }
    }
    let most_active_month = month_counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        // Earlier month outranks a later one on equal counts
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(index, count)| MonthActivity {
            month: index as u32 + 1,
            count: *count,
        });

    // Plain genre counts, not rating-weighted
    let mut genre_counts: BTreeMap<&str, u64> = BTreeMap::new();
    for review in &in_year {
        for genre in &review.genres {
            *genre_counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }
    let top_genre = genre_counts
        .iter()
        .fold(None::<(&str, u64)>, |best, (name, count)| match best {
            Some((_, best_count)) if *count <= best_count => best,
            _ => Some((*name, *count)),
        })
        .map(|(name, count)| GenreActivity {
            name: name.to_string(),
            count,
        });

    let mut best: Option<&ReviewedMovie> = None;
    for review in &in_year {
        if best.map(|b| review.rating > b.rating).unwrap_or(true) {
            best = Some(review);
        }
    }

    AnnualStats {
        year,
        total_movies,
        total_runtime,
        average_rating,
        most_active_month,
        top_genre,
        best_rated_movie: best.map(|r| r.title.clone()),
    }
}

/// Counts watched movies per release-date decade. Movies without a release
/// date are skipped.
pub fn release_decades(movies: &[WatchedMovie]) -> BTreeMap<i32, u64> {
    let mut decades = BTreeMap::new();
    for movie in movies {
        if let Some(date) = movie.release_date {
            let decade = date.year().div_euclid(10) * 10;
            *decades.entry(decade).or_insert(0) += 1;
        }
    }
    decades
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn movie_at(title: &str, created_at: DateTime<Utc>) -> WatchedMovie {
        WatchedMovie {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            tmdb_id: 1,
            title: title.to_string(),
            genres: vec![],
            poster_path: None,
            release_date: None,
            runtime: None,
            created_at,
        }
    }

    fn movie_released(title: &str, release: Option<NaiveDate>) -> WatchedMovie {
        WatchedMovie {
            release_date: release,
            ..movie_at(title, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        }
    }

    fn review_at(rating: i16, created_at: DateTime<Utc>) -> ReviewedMovie {
        ReviewedMovie {
            rating,
            tags: None,
            watched_date: None,
            created_at,
            title: "Movie".to_string(),
            genres: vec![],
            runtime: None,
        }
    }

    fn watched_review(
        title: &str,
        rating: i16,
        watched: NaiveDate,
        genres: &[&str],
        runtime: Option<i32>,
    ) -> ReviewedMovie {
        ReviewedMovie {
            rating,
            tags: None,
            watched_date: Some(watched),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            runtime,
        }
    }

    #[test]
    fn test_month_minus_wraps_across_years() {
        assert_eq!(month_minus(2025, 3, 0), (2025, 3));
        assert_eq!(month_minus(2025, 3, 2), (2025, 1));
        assert_eq!(month_minus(2025, 3, 3), (2024, 12));
        assert_eq!(month_minus(2025, 1, 13), (2023, 12));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_monthly_trend_window_and_order() {
        let now = Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap();
        let trend = monthly_trend(&[], &[], now);

        assert_eq!(trend.len(), 12);
        assert_eq!(trend[0].label, "2024-09");
        assert_eq!(trend[11].label, "2025-08");
        assert!(trend.iter().all(|b| b.movies == 0 && b.reviews == 0));
        assert!(trend.iter().all(|b| b.avg_rating == 0.0));
    }

    #[test]
    fn test_monthly_trend_bucket_completeness() {
        // Every in-window movie lands in exactly one bucket, none dropped
        let now = Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap();
        let movies = vec![
            movie_at("a", Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
            movie_at("b", Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()),
            movie_at("c", Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap()),
            movie_at("d", Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()),
            // Outside the window entirely
            movie_at("old", Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()),
        ];

        let trend = monthly_trend(&movies, &[], now);
        let total: u64 = trend.iter().map(|b| b.movies).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_monthly_trend_buckets_by_created_at() {
        let now = Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap();
        let reviews = vec![
            review_at(4, Utc.with_ymd_and_hms(2025, 7, 2, 0, 0, 0).unwrap()),
            review_at(2, Utc.with_ymd_and_hms(2025, 7, 20, 0, 0, 0).unwrap()),
            review_at(5, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()),
        ];

        let trend = monthly_trend(&[], &reviews, now);
        let july = trend.iter().find(|b| b.label == "2025-07").unwrap();
        assert_eq!(july.reviews, 2);
        assert!((july.avg_rating - 3.0).abs() < f64::EPSILON);

        let august = trend.iter().find(|b| b.label == "2025-08").unwrap();
        assert_eq!(august.reviews, 1);
        assert!((august.avg_rating - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calendar_month_day_buckets() {
        let movies = vec![
            movie_at("one", Utc.with_ymd_and_hms(2025, 6, 3, 10, 0, 0).unwrap()),
            movie_at("two", Utc.with_ymd_and_hms(2025, 6, 3, 22, 0, 0).unwrap()),
            movie_at(
                "other month",
                Utc.with_ymd_and_hms(2025, 7, 3, 0, 0, 0).unwrap(),
            ),
        ];

        let days = calendar_month(&movies, 2025, 6);
        assert_eq!(days.len(), 30);

        let third = &days[2];
        assert_eq!(third.date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        assert_eq!(third.count, 2);
        assert_eq!(third.titles, vec!["one", "two"]);
        assert_eq!(third.intensity, Intensity::Medium);

        assert_eq!(days.iter().filter(|d| d.count > 0).count(), 1);
    }

    #[test]
    fn test_calendar_intensity_saturates() {
        // 13 movies on one day still map to the max bucket
        let day = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let movies: Vec<WatchedMovie> =
            (0..13).map(|i| movie_at(&format!("m{}", i), day)).collect();

        let days = calendar_month(&movies, 2025, 6);
        assert_eq!(days[9].count, 13);
        assert_eq!(days[9].intensity, Intensity::Max);
    }

    #[test]
    fn test_annual_stats_empty_input() {
        let stats = annual_stats(&[], 2025);
        assert_eq!(stats.total_movies, 0);
        assert_eq!(stats.total_runtime, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.most_active_month.is_none());
        assert!(stats.top_genre.is_none());
        assert!(stats.best_rated_movie.is_none());
    }

    #[test]
    fn test_annual_stats_totals() {
        let reviews = vec![
            watched_review(
                "A",
                5,
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                &["Drama"],
                Some(120),
            ),
            watched_review(
                "B",
                3,
                NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                &["Drama", "Action"],
                Some(90),
            ),
            // No runtime recorded; counts as zero minutes
            watched_review(
                "C",
                4,
                NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
                &["Action"],
                None,
            ),
            // Different year, excluded
            watched_review(
                "D",
                5,
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                &["Horror"],
                Some(100),
            ),
        ];

        let stats = annual_stats(&reviews, 2025);
        assert_eq!(stats.total_movies, 3);
        assert_eq!(stats.total_runtime, 210);
        assert!((stats.average_rating - 4.0).abs() < f64::EPSILON);

        let most_active = stats.most_active_month.unwrap();
        assert_eq!(most_active.month, 3);
        assert_eq!(most_active.count, 2);

        assert_eq!(stats.best_rated_movie.as_deref(), Some("A"));
    }

    #[test]
    fn test_annual_stats_month_tie_breaks_to_earliest() {
        let reviews = vec![
            watched_review("A", 3, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), &[], None),
            watched_review("B", 3, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), &[], None),
        ];

        let stats = annual_stats(&reviews, 2025);
        assert_eq!(stats.most_active_month.unwrap().month, 2);
    }

    #[test]
    fn test_annual_stats_genre_tie_breaks_lexicographically() {
        let reviews = vec![
            watched_review(
                "A",
                3,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                &["Thriller"],
                None,
            ),
            watched_review(
                "B",
                3,
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                &["Action"],
                None,
            ),
        ];

        let stats = annual_stats(&reviews, 2025);
        let top = stats.top_genre.unwrap();
        assert_eq!(top.name, "Action");
        assert_eq!(top.count, 1);
    }

    #[test]
    fn test_annual_stats_best_rated_first_occurrence_wins() {
        let reviews = vec![
            watched_review("First", 5, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), &[], None),
            watched_review("Second", 5, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), &[], None),
        ];

        let stats = annual_stats(&reviews, 2025);
        assert_eq!(stats.best_rated_movie.as_deref(), Some("First"));
    }

    #[test]
    fn test_annual_stats_skips_rows_without_watched_date() {
        let mut review =
            watched_review("A", 4, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), &[], None);
        review.watched_date = None;

        let stats = annual_stats(&[review], 2025);
        assert_eq!(stats.total_movies, 0);
    }

    #[test]
    fn test_release_decades() {
        let movies = vec![
            movie_released("a", NaiveDate::from_ymd_opt(1994, 6, 1)),
            movie_released("b", NaiveDate::from_ymd_opt(1999, 12, 31)),
            movie_released("c", NaiveDate::from_ymd_opt(2010, 1, 1)),
            movie_released("d", None),
        ];

        let decades = release_decades(&movies);
        assert_eq!(decades[&1990], 2);
        assert_eq!(decades[&2010], 1);
        assert_eq!(decades.len(), 2);
    }
}
