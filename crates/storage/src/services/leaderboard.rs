use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dto::common::PaginatedResponse;
use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery, SortField, SortOrder};
use crate::models::{Influencer, Prediction, TimeRange};
use crate::services::aggregation::aggregate_predictions;
use crate::services::tiering::classify_tier;

/// Joins each influencer with its tier and the statistics of its predictions
/// made inside `time_range`.
///
/// Influencers whose stored score cannot be classified are left out of the
/// result; one bad record never aborts the whole leaderboard.
pub fn build_entries(
    influencers: &[Influencer],
    predictions: &[Prediction],
    time_range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let mut by_influencer: HashMap<Uuid, Vec<&Prediction>> = HashMap::new();
    for prediction in predictions
        .iter()
        .filter(|p| time_range.contains(p.predicted_at, now))
    {
        by_influencer
            .entry(prediction.influencer_id)
            .or_default()
            .push(prediction);
    }

    influencers
        .iter()
        .filter_map(|influencer| {
            let tier = match classify_tier(influencer.score) {
                Ok(tier) => tier,
                Err(e) => {
                    warn!(
                        "Dropping influencer {} from leaderboard: {}",
                        influencer.influencer_id, e
                    );
                    return None;
                }
            };

            let in_range = by_influencer
                .get(&influencer.influencer_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let stats = aggregate_predictions(in_range.iter().copied());

            Some(LeaderboardEntry {
                rank: influencer.rank,
                influencer_id: influencer.influencer_id,
                handle: influencer.handle.clone(),
                display_name: influencer.display_name.clone(),
                platform: influencer.platform,
                followers: influencer.followers,
                verified: influencer.verified,
                score: influencer.score,
                tier: tier.into(),
                total_predictions: stats.total_count,
                resolved_predictions: stats.resolved_count(),
                correct_predictions: stats.correct_count,
                accuracy: stats.accuracy,
                current_streak: stats.current_streak,
                average_return: stats.average_return,
            })
        })
        .collect()
}

/// Builds entries for the query's time range and returns the requested page.
pub fn leaderboard_page(
    influencers: &[Influencer],
    predictions: &[Prediction],
    query: &LeaderboardQuery,
    now: DateTime<Utc>,
) -> PaginatedResponse<LeaderboardEntry> {
    let entries = build_entries(influencers, predictions, query.time_range, now);
    query_leaderboard(&entries, query)
}

/// Filters, sorts and slices leaderboard entries.
///
/// `query.time_range` is not applied here: the entries must already have
/// been built for that range with [`build_entries`]. Use
/// [`leaderboard_page`] to do both in one call.
///
/// The input is only borrowed and the sort is stable, so identical input and
/// query always produce the identical page.
pub fn query_leaderboard(
    entries: &[LeaderboardEntry],
    query: &LeaderboardQuery,
) -> PaginatedResponse<LeaderboardEntry> {
    let mut selected: Vec<&LeaderboardEntry> = entries
        .iter()
        .filter(|entry| entry.total_predictions >= query.min_predictions)
        .collect();

    sort_entries(&mut selected, query.sort_by, query.order);

    debug!(
        "Leaderboard query sort={} order={} min={} matched {} of {} entries",
        query.sort_by.as_str(),
        query.order.as_str(),
        query.min_predictions,
        selected.len(),
        entries.len()
    );

    PaginatedResponse::paginate(selected, query.pagination).map(LeaderboardEntry::clone)
}

pub fn sort_entries(entries: &mut [&LeaderboardEntry], sort_by: SortField, order: SortOrder) {
    entries.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort_by);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &LeaderboardEntry, b: &LeaderboardEntry, sort_by: SortField) -> Ordering {
    match sort_by {
        SortField::Rank => a.rank.cmp(&b.rank),
        SortField::Accuracy => a.accuracy.total_cmp(&b.accuracy),
        SortField::Followers => a.followers.cmp(&b.followers),
        SortField::TotalPredictions => a.total_predictions.cmp(&b.total_predictions),
        SortField::Streak => a.current_streak.cmp(&b.current_streak),
        SortField::AvgReturn => a.average_return.total_cmp(&b.average_return),
    }
}
