//! Annual watch-goal progress.

use crate::models::GoalProgress;

/// Default target shown before a user sets an explicit goal
pub const DEFAULT_TARGET: i32 = 50;

/// Progress toward a year's watch goal.
///
/// Percentage is capped at 100 and is 0.0 for a zero target (never a
/// division error). A goal counts as completed only when a positive target
/// has been reached.
pub fn progress(year: i32, target: i32, watched: i64) -> GoalProgress {
    let target = target.max(0) as u32;
    let watched = watched.max(0) as u32;

    let percentage = if target == 0 {
        0.0
    } else {
        (watched as f64 / target as f64 * 100.0).min(100.0)
    };

    GoalProgress {
        year,
        target,
        watched,
        percentage,
        remaining: target.saturating_sub(watched),
        completed: target > 0 && watched >= target,
    }
}
