use chrono::{DateTime, Utc};

use crate::dto::influencer::InfluencerProfile;
use crate::error::Result;
use crate::models::{Influencer, Prediction};
use crate::services::aggregation::aggregate_predictions;
use crate::services::scoring::{ScoringConfig, ScoringInput, score_influencer};
use crate::services::tiering::classify_tier;

/// All-time view of one influencer: stats, freshly computed breakdown and tier.
pub fn influencer_profile(
    influencer: &Influencer,
    predictions: &[Prediction],
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> Result<InfluencerProfile> {
    let owned: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| p.influencer_id == influencer.influencer_id)
        .collect();

    let stats = aggregate_predictions(owned.iter().copied());
    let breakdown = score_influencer(
        &ScoringInput::from_predictions(owned.iter().copied(), config, now),
        config,
    );
    let tier = classify_tier(breakdown.total)?;

    Ok(InfluencerProfile {
        influencer: influencer.clone(),
        stats,
        breakdown,
        tier: tier.into(),
    })
}
