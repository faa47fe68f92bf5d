use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Youtube,
    Telegram,
    Tiktok,
    Other,
}

/// Influencer identity plus the running counters maintained by the scoring
/// pipeline. `score` lives on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub influencer_id: Uuid,
    pub platform: Platform,
    pub handle: String,
    pub display_name: String,
    pub followers: u64,
    pub verified: bool,
    pub total_predictions: u32,
    pub resolved_predictions: u32,
    pub correct_predictions: u32,
    pub current_streak: u32,
    pub rank: u32,
    pub score: f64,
}

impl Influencer {
    /// Creates an influencer with zeroed counters; the scoring pipeline fills them in.
    pub fn new(
        influencer_id: Uuid,
        platform: Platform,
        handle: impl Into<String>,
        display_name: impl Into<String>,
        followers: u64,
    ) -> Self {
        Self {
            influencer_id,
            platform,
            handle: handle.into(),
            display_name: display_name.into(),
            followers,
            verified: false,
            total_predictions: 0,
            resolved_predictions: 0,
            correct_predictions: 0,
            current_streak: 0,
            rank: 0,
            score: 0.0,
        }
    }
}
