use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{Pagination, parse_lenient};
use crate::error::StorageError;
use crate::models::{Platform, TimeRange};
use crate::services::tiering::TierBadge;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Rank,
    Accuracy,
    Followers,
    TotalPredictions,
    Streak,
    AvgReturn,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Accuracy => "accuracy",
            Self::Followers => "followers",
            Self::TotalPredictions => "totalPredictions",
            Self::Streak => "streak",
            Self::AvgReturn => "avgReturn",
        }
    }
}

impl FromStr for SortField {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(Self::Rank),
            "accuracy" => Ok(Self::Accuracy),
            "followers" => Ok(Self::Followers),
            "predictions" | "totalPredictions" => Ok(Self::TotalPredictions),
            "streak" => Ok(Self::Streak),
            "avgReturn" => Ok(Self::AvgReturn),
            other => Err(StorageError::Validation(format!(
                "unknown sort field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(StorageError::Validation(format!(
                "unknown sort order '{}'",
                other
            ))),
        }
    }
}

/// Raw leaderboard query as it arrives from a query string or CLI flags.
/// Every field is kept as text so that bad input can fall back to defaults
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// One of rank, accuracy, followers, predictions, totalPredictions, streak, avgReturn
    pub sort_by: Option<String>,
    /// asc or desc
    pub order: Option<String>,
    /// One of 7d, 30d, 90d, 1y, all
    pub time_range: Option<String>,
    pub min_predictions: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Normalized leaderboard query. The only way to build one from user input
/// is [`LeaderboardQuery::normalize`], which is shared by every leaderboard
/// view so fallbacks stay consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub sort_by: SortField,
    pub order: SortOrder,
    pub time_range: TimeRange,
    pub min_predictions: u32,
    pub pagination: Pagination,
}

impl LeaderboardQuery {
    pub fn normalize(params: &LeaderboardParams) -> Self {
        let sort_by = parse_or_default(params.sort_by.as_deref(), "sortBy");
        let order = parse_or_default(params.order.as_deref(), "order");
        let time_range = parse_or_default(params.time_range.as_deref(), "timeRange");
        let min_predictions = parse_lenient(params.min_predictions.as_deref())
            .map(|n| n.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0);
        let pagination = Pagination::clamped(
            parse_lenient(params.page.as_deref()),
            parse_lenient(params.page_size.as_deref()),
        );

        Self {
            sort_by,
            order,
            time_range,
            min_predictions,
            pagination,
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>, field: &str) -> T
where
    T: FromStr<Err = StorageError> + Default,
{
    match raw {
        Some(value) => value.parse().unwrap_or_else(|e| {
            tracing::debug!("falling back to default {}: {}", field, e);
            T::default()
        }),
        None => T::default(),
    }
}

/// One row of the leaderboard, scoped to the query's time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub influencer_id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub platform: Platform,
    pub followers: u64,
    pub verified: bool,
    pub score: f64,
    pub tier: TierBadge,
    pub total_predictions: u32,
    pub resolved_predictions: u32,
    pub correct_predictions: u32,
    /// Percentage of resolved in-range predictions that were correct
    pub accuracy: f64,
    pub current_streak: u32,
    pub average_return: f64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HighlightParams {
    /// Number of entries, clamped to 1..=50 (default 5)
    pub limit: Option<String>,
}

/// The three named views served together on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub top_performers: Vec<LeaderboardEntry>,
    pub hottest_streaks: Vec<LeaderboardEntry>,
    pub biggest_gainers: Vec<LeaderboardEntry>,
}
