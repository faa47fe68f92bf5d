use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Influencer;
use crate::services::aggregation::PredictionStats;
use crate::services::scoring::ScoreBreakdown;
use crate::services::tiering::TierBadge;

/// Detailed influencer response with all-time statistics and score breakdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerProfile {
    pub influencer: Influencer,
    pub stats: PredictionStats,
    pub breakdown: ScoreBreakdown,
    pub tier: TierBadge,
}

/// Query for the influencer directory: the all-time leaderboard without a
/// minimum prediction threshold.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DirectoryParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}
