use chrono::{DateTime, Utc};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        leaderboard::{LeaderboardEntry, LeaderboardParams},
    },
    services::LeaderboardService,
};

/// Get one leaderboard page as of `now`
pub fn get_leaderboard(
    db: &Database,
    params: &LeaderboardParams,
    now: DateTime<Utc>,
) -> PaginatedResponse<LeaderboardEntry> {
    LeaderboardService::from_database(db).leaderboard(params, now)
}

pub fn get_top_performers(
    db: &Database,
    limit: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    LeaderboardService::from_database(db).top_performers(limit, now)
}

pub fn get_hottest_streaks(
    db: &Database,
    limit: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    LeaderboardService::from_database(db).hottest_streaks(limit, now)
}

pub fn get_biggest_gainers(
    db: &Database,
    limit: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    LeaderboardService::from_database(db).biggest_gainers(limit, now)
}
