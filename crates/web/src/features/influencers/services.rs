use chrono::{DateTime, Utc};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        influencer::{DirectoryParams, InfluencerProfile},
        leaderboard::LeaderboardEntry,
        prediction::PredictionFeedParams,
    },
    error::Result,
    models::Prediction,
    services::LeaderboardService,
};
use uuid::Uuid;

pub fn list_influencers(
    db: &Database,
    params: &DirectoryParams,
    now: DateTime<Utc>,
) -> PaginatedResponse<LeaderboardEntry> {
    LeaderboardService::from_database(db).directory(params, now)
}

pub fn get_influencer_profile(
    db: &Database,
    influencer_id: Uuid,
    now: DateTime<Utc>,
) -> Result<InfluencerProfile> {
    LeaderboardService::from_database(db).profile(influencer_id, now)
}

pub fn list_influencer_predictions(
    db: &Database,
    influencer_id: Uuid,
    params: &PredictionFeedParams,
    now: DateTime<Utc>,
) -> Result<PaginatedResponse<Prediction>> {
    LeaderboardService::from_database(db).prediction_feed(influencer_id, params, now)
}
