use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storage::models::{Direction, Influencer, Platform, Prediction, PredictionStatus};
use uuid::Uuid;
use validator::Validate;

pub const FORMAT_VERSION: &str = "1.0.0";

/// On-disk fixture: the influencer and prediction records a demo deployment
/// starts from. Counters, scores and ranks are not part of the format; they
/// are derived after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSet {
    pub format_version: String,
    pub influencers: Vec<InfluencerData>,
    #[serde(default)]
    pub predictions: Vec<PredictionData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerData {
    pub id: Uuid,
    pub platform: Platform,

    #[validate(length(min = 1, max = 64, message = "Handle must be between 1 and 64 characters"))]
    pub handle: String,

    #[validate(length(
        min = 1,
        max = 128,
        message = "Display name must be between 1 and 128 characters"
    ))]
    pub display_name: String,

    pub followers: u64,

    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub id: Uuid,
    pub influencer_id: Uuid,
    pub coin_symbol: String,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Decimal>,
    pub predicted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: PredictionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realized_return: Option<Decimal>,
}

impl From<InfluencerData> for Influencer {
    fn from(data: InfluencerData) -> Self {
        let mut influencer = Influencer::new(
            data.id,
            data.platform,
            data.handle,
            data.display_name,
            data.followers,
        );
        influencer.verified = data.verified;
        influencer
    }
}

impl From<PredictionData> for Prediction {
    fn from(data: PredictionData) -> Self {
        Self {
            prediction_id: data.id,
            influencer_id: data.influencer_id,
            coin_symbol: data.coin_symbol.to_uppercase(),
            direction: data.direction,
            target_price: data.target_price,
            predicted_at: data.predicted_at,
            status: data.status,
            resolved_at: data.resolved_at,
            realized_return: data.realized_return,
        }
    }
}
