use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::User;

/// One row of the points leaderboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: Uuid,
    pub name: String,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub points: i64,
}

/// Rank users that are already ordered by points descending. Ranks start at 1
/// and users with equal points share a rank.
pub fn rank_users(users: Vec<User>) -> Vec<LeaderboardEntry> {
    let mut entries = Vec::with_capacity(users.len());
    let mut previous: Option<(i64, i64)> = None;
    for (index, user) in users.into_iter().enumerate() {
        let rank = match previous {
            Some((points, rank)) if points == user.points => rank,
            _ => index as i64 + 1,
        };
        previous = Some((user.points, rank));
        entries.push(LeaderboardEntry {
            rank,
            user_id: user.id,
            name: user.name,
            branch: user.branch,
            year: user.year,
            points: user.points,
        });
    }
    entries
}
