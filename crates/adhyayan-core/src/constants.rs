//! Application-wide constants.

/// Points awarded to an uploader when an admin approves their content.
pub const POINTS_PER_APPROVED_UPLOAD: i64 = 10;

/// Points awarded for each reply posted in the forum.
pub const POINTS_PER_FORUM_REPLY: i64 = 2;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard upper bound for page sizes, regardless of configuration.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of entries returned by the leaderboard when no limit is given.
pub const DEFAULT_LEADERBOARD_SIZE: i64 = 10;

/// Minimum password length for credential accounts.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Lowest and highest accepted content rating.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Clamp a requested page size into `1..=max`, falling back to the default.
pub fn clamp_limit(limit: Option<i64>, max: i64) -> i64 {
    limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, max.clamp(1, MAX_PAGE_SIZE))
}
