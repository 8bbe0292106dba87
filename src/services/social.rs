//! Social read models: follow suggestions and community top-rated movies.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{ProfileEngagement, PublicReview, SuggestedFollower, TopRatedMovie};

/// How many follow suggestions to surface
pub const SUGGESTION_LIMIT: usize = 5;

/// Ranks profiles for follow suggestions.
///
/// Score = public review count x 2 + follower count. Profiles in the
/// exclusion set (already followed, or the user themselves) and profiles
/// with no public reviews are dropped. Ties order by username ascending.
pub fn suggest_followers(
    profiles: &[ProfileEngagement],
    excluded: &HashSet<Uuid>,
) -> Vec<SuggestedFollower> {
    let mut suggestions: Vec<SuggestedFollower> = profiles
        .iter()
        .filter(|p| !excluded.contains(&p.id) && p.review_count > 0)
        .map(|p| {
            let review_count = p.review_count.max(0) as u64;
            let followers_count = p.followers_count.max(0) as u64;
            SuggestedFollower {
                id: p.id,
                username: p.username.clone(),
                avatar_url: p.avatar_url.clone(),
                review_count,
                followers_count,
                score: review_count * 2 + followers_count,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.cmp(&a.score).then(a.username.cmp(&b.username)));
    suggestions.truncate(SUGGESTION_LIMIT);
    suggestions
}

/// Community top-rated aggregation over public reviews.
///
/// Groups reviews by catalog id, averages the ratings, drops movies with
/// fewer than `min_reviews` reviews, and orders by average descending
/// (ties: more reviews first, then title ascending).
pub fn top_rated(reviews: &[PublicReview], min_reviews: u64, limit: usize) -> Vec<TopRatedMovie> {
    let mut grouped: Vec<TopRatedMovie> = Vec::new();

    for review in reviews {
        match grouped.iter_mut().find(|m| m.tmdb_id == review.tmdb_id) {
            Some(movie) => {
                // Running average keeps a single pass over the rows
                let total = movie.average_rating * movie.review_count as f64 + review.rating as f64;
                movie.review_count += 1;
                movie.average_rating = total / movie.review_count as f64;
            }
            None => grouped.push(TopRatedMovie {
                tmdb_id: review.tmdb_id,
                title: review.title.clone(),
                poster_path: review.poster_path.clone(),
                average_rating: review.rating as f64,
                review_count: 1,
            }),
        }
    }

    let mut ranked: Vec<TopRatedMovie> = grouped
        .into_iter()
        .filter(|m| m.review_count >= min_reviews)
        .collect();

    ranked.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.review_count.cmp(&a.review_count))
            .then(a.title.cmp(&b.title))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str, reviews: i64, followers: i64) -> ProfileEngagement {
        ProfileEngagement {
            id: Uuid::new_v4(),
            username: username.to_string(),
            avatar_url: None,
            review_count: reviews,
            followers_count: followers,
        }
    }

    fn review(tmdb_id: i64, title: &str, rating: i16) -> PublicReview {
        PublicReview {
            tmdb_id,
            title: title.to_string(),
            poster_path: None,
            rating,
        }
    }

    #[test]
    fn test_suggestion_scoring() {
        let profiles = vec![
            profile("casual", 1, 0),   // score 2
            profile("critic", 10, 5),  // score 25
            profile("popular", 2, 30), // score 34
        ];

        let suggestions = suggest_followers(&profiles, &HashSet::new());
        assert_eq!(suggestions[0].username, "popular");
        assert_eq!(suggestions[0].score, 34);
        assert_eq!(suggestions[1].username, "critic");
        assert_eq!(suggestions[2].username, "casual");
    }

    #[test]
    fn test_suggestions_drop_excluded_and_reviewless() {
        let followed = profile("followed", 5, 5);
        let profiles = vec![
            followed.clone(),
            profile("lurker", 0, 100),
            profile("writer", 3, 0),
        ];
        let excluded: HashSet<Uuid> = [followed.id].into_iter().collect();

        let suggestions = suggest_followers(&profiles, &excluded);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].username, "writer");
    }

    #[test]
    fn test_suggestions_capped_at_five() {
        let profiles: Vec<ProfileEngagement> =
            (0..8).map(|i| profile(&format!("user{}", i), 1, i)).collect();

        let suggestions = suggest_followers(&profiles, &HashSet::new());
        assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
    }

    #[test]
    fn test_suggestion_ties_order_by_username() {
        let profiles = vec![profile("zoe", 2, 0), profile("amy", 2, 0)];
        let suggestions = suggest_followers(&profiles, &HashSet::new());
        assert_eq!(suggestions[0].username, "amy");
    }

    #[test]
    fn test_top_rated_groups_and_averages() {
        let reviews = vec![
            review(1, "Oldboy", 5),
            review(1, "Oldboy", 4),
            review(1, "Oldboy", 5),
            review(2, "Filler", 3),
            review(2, "Filler", 3),
            review(2, "Filler", 3),
        ];

        let ranked = top_rated(&reviews, 3, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Oldboy");
        assert!((ranked[0].average_rating - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(ranked[0].review_count, 3);
    }

    #[test]
    fn test_top_rated_enforces_min_reviews() {
        let reviews = vec![
            review(1, "Niche", 5),
            review(2, "Seen", 4),
            review(2, "Seen", 4),
            review(2, "Seen", 4),
        ];

        let ranked = top_rated(&reviews, 3, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Seen");
    }

    #[test]
    fn test_top_rated_truncates_to_limit() {
        let mut reviews = Vec::new();
        for id in 0..20 {
            reviews.push(review(id, &format!("m{}", id), 4));
        }

        let ranked = top_rated(&reviews, 1, 10);
        assert_eq!(ranked.len(), 10);
    }

    #[test]
    fn test_top_rated_empty_input() {
        assert!(top_rated(&[], 3, 10).is_empty());
    }
}
