use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod catalog;

// ============================================================================
// Backend rows (owned and persisted by the relational backend; read-only here
// apart from the watch-goal upsert)
// ============================================================================

/// A movie a user has logged as watched
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchedMovie {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Catalog (TMDB) id of the movie
    pub tmdb_id: i64,
    pub title: String,
    pub genres: Vec<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes
    pub runtime: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the genre/runtime fields of its movie,
/// the shape the aggregate computations consume. The backend owns the full
/// review row; analytics only reads this projection.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewedMovie {
    pub rating: i16,
    pub tags: Option<Vec<String>>,
    pub watched_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub genres: Vec<String>,
    pub runtime: Option<i32>,
}

/// A profile joined with its engagement counters, input to follow suggestions
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileEngagement {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub review_count: i64,
    pub followers_count: i64,
}

/// A public review joined with its movie's catalog identity,
/// input to community top-rated aggregation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PublicReview {
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: i16,
}

/// Annual watch goal; one row per (user, year), upsert semantics
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub year: i32,
    pub target_movies: i32,
}

// ============================================================================
// Derived aggregates (computed on demand, never persisted)
// ============================================================================

/// Frequency/score entry for one genre
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreScore {
    pub name: String,
    pub score: f64,
    pub count: u64,
}

/// Frequency entry for one review tag
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// Statistical summary over a set of reviews
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingSummary {
    pub count: u64,
    /// 0.0 when there are no reviews, never NaN
    pub average: f64,
    /// Title of the first review holding the maximum rating
    pub best_title: Option<String>,
    pub best_rating: Option<i16>,
}

/// One month of the rolling 12-month trend
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthBucket {
    /// "YYYY-MM"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub movies: u64,
    pub reviews: u64,
    pub avg_rating: f64,
}

/// Visual intensity class for a calendar day, a pure step function of count
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl Intensity {
    /// 0 -> None, 1 -> Low, 2 -> Medium, 3 -> High, >=4 -> Max
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => Intensity::None,
            1 => Intensity::Low,
            2 => Intensity::Medium,
            3 => Intensity::High,
            _ => Intensity::Max,
        }
    }
}

/// One day of the calendar view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u64,
    pub titles: Vec<String>,
    pub intensity: Intensity,
}

/// Most-active-month entry of the annual stats
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthActivity {
    pub month: u32,
    pub count: u64,
}

/// Top-genre entry of the annual stats
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreActivity {
    pub name: String,
    pub count: u64,
}

/// Calendar-year watching summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnnualStats {
    pub year: i32,
    pub total_movies: u64,
    /// Sum of runtimes in minutes; missing runtimes count as 0
    pub total_runtime: u64,
    pub average_rating: f64,
    pub most_active_month: Option<MonthActivity>,
    pub top_genre: Option<GenreActivity>,
    pub best_rated_movie: Option<String>,
}

/// Watched-movie count for one release decade
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DecadeCount {
    pub decade: i32,
    pub count: u64,
}

/// Watch-goal progress for one year
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GoalProgress {
    pub year: i32,
    pub target: u32,
    pub watched: u32,
    /// 0.0-100.0, 0.0 when the target is 0
    pub percentage: f64,
    pub remaining: u32,
    pub completed: bool,
}

/// A catalog candidate after recommendation scoring
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredCandidate {
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub score: f64,
}

/// A profile ranked for follow suggestions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuggestedFollower {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub review_count: u64,
    pub followers_count: u64,
    pub score: u64,
}

/// A movie ranked by community average rating
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopRatedMovie {
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub average_rating: f64,
    pub review_count: u64,
}
