//! Named leaderboard views. Every selector goes through
//! [`LeaderboardQuery::normalize`] and [`query_leaderboard`] so it can never
//! disagree with the main leaderboard about ordering or bounds.

use crate::dto::leaderboard::{
    Highlights, LeaderboardEntry, LeaderboardParams, LeaderboardQuery, SortField, SortOrder,
};
use crate::models::TimeRange;
use crate::services::leaderboard::query_leaderboard;

pub const DEFAULT_HIGHLIGHT_LIMIT: u32 = 5;
pub const MAX_HIGHLIGHT_LIMIT: u32 = 50;

pub fn normalize_limit(limit: Option<i64>) -> u32 {
    limit
        .map(|l| l.clamp(1, MAX_HIGHLIGHT_LIMIT as i64) as u32)
        .unwrap_or(DEFAULT_HIGHLIGHT_LIMIT)
}

fn highlight_query(sort_by: SortField, limit: Option<i64>) -> LeaderboardQuery {
    LeaderboardQuery::normalize(&LeaderboardParams {
        sort_by: Some(sort_by.as_str().to_string()),
        order: Some(SortOrder::Desc.as_str().to_string()),
        time_range: Some(TimeRange::All.as_str().to_string()),
        min_predictions: None,
        page: None,
        page_size: Some(normalize_limit(limit).to_string()),
    })
}

fn select(entries: &[LeaderboardEntry], sort_by: SortField, limit: Option<i64>) -> Vec<LeaderboardEntry> {
    query_leaderboard(entries, &highlight_query(sort_by, limit)).data
}

pub fn top_performers(entries: &[LeaderboardEntry], limit: Option<i64>) -> Vec<LeaderboardEntry> {
    select(entries, SortField::Accuracy, limit)
}

pub fn hottest_streaks(entries: &[LeaderboardEntry], limit: Option<i64>) -> Vec<LeaderboardEntry> {
    select(entries, SortField::Streak, limit)
}

pub fn biggest_gainers(entries: &[LeaderboardEntry], limit: Option<i64>) -> Vec<LeaderboardEntry> {
    select(entries, SortField::AvgReturn, limit)
}

pub fn highlights(entries: &[LeaderboardEntry], limit: Option<i64>) -> Highlights {
    Highlights {
        top_performers: top_performers(entries, limit),
        hottest_streaks: hottest_streaks(entries, limit),
        biggest_gainers: biggest_gainers(entries, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::leaderboard::tests::entry;

    fn entries() -> Vec<LeaderboardEntry> {
        (1..=60).map(|rank| entry(rank, (rank * 37 % 61) as f64, 0)).collect()
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(normalize_limit(None), 5);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(-4)), 1);
        assert_eq!(normalize_limit(Some(80)), 50);
        assert_eq!(normalize_limit(Some(12)), 12);
    }

    #[test]
    fn test_top_performers_by_accuracy() {
        let top = top_performers(&entries(), None);

        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].accuracy >= w[1].accuracy));
    }

    #[test]
    fn test_selectors_ignore_minimum_threshold() {
        // every fixture entry has zero predictions in range
        assert_eq!(top_performers(&entries(), Some(100)).len(), 50);
    }

    #[test]
    fn test_selectors_match_leaderboard_engine() {
        let all = entries();
        let via_engine = query_leaderboard(
            &all,
            &LeaderboardQuery::normalize(&LeaderboardParams {
                sort_by: Some("avgReturn".to_string()),
                order: Some("desc".to_string()),
                page_size: Some("7".to_string()),
                ..Default::default()
            }),
        );

        assert_eq!(biggest_gainers(&all, Some(7)), via_engine.data);
    }

    #[test]
    fn test_hottest_streaks_ordering() {
        let streaks: Vec<u32> = hottest_streaks(&entries(), Some(20))
            .iter()
            .map(|e| e.current_streak)
            .collect();

        assert!(streaks.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(streaks[0], 3);
    }

    #[test]
    fn test_highlights_bundle() {
        let bundle = highlights(&entries(), Some(3));
        assert_eq!(bundle.top_performers.len(), 3);
        assert_eq!(bundle.hottest_streaks.len(), 3);
        assert_eq!(bundle.biggest_gainers.len(), 3);
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(top_performers(&[], None).is_empty());
    }
}
