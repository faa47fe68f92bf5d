use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, StorageError};
use crate::services::scoring::MAX_SCORE;

/// Accuracy band. Variants are declared lowest first so the derived `Ord`
/// follows the score ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Novice,
    Average,
    Skilled,
    Elite,
    Legendary,
}

/// Lower bound of each band, highest first. Anything below the last
/// threshold is `Novice`.
const BANDS: [(f64, Tier); 4] = [
    (90.0, Tier::Legendary),
    (75.0, Tier::Elite),
    (60.0, Tier::Skilled),
    (40.0, Tier::Average),
];

impl Tier {
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Novice => 1,
            Self::Average => 2,
            Self::Skilled => 3,
            Self::Elite => 4,
            Self::Legendary => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Average => "Average",
            Self::Skilled => "Skilled",
            Self::Elite => "Elite",
            Self::Legendary => "Legendary",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Novice => "gray",
            Self::Average => "green",
            Self::Skilled => "blue",
            Self::Elite => "purple",
            Self::Legendary => "gold",
        }
    }
}

/// Maps a score in `[0, 100]` to its tier.
///
/// Scores outside the domain (including NaN and infinities) are rejected
/// with [`StorageError::InvalidScore`]; they are never clamped.
pub fn classify_tier(score: f64) -> Result<Tier> {
    if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
        return Err(StorageError::InvalidScore(score));
    }

    let tier = BANDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::Novice);

    Ok(tier)
}

/// Presentation-ready tier: `{tier, label, color}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TierBadge {
    pub tier: u8,
    pub label: String,
    pub color: String,
}

impl From<Tier> for TierBadge {
    fn from(tier: Tier) -> Self {
        Self {
            tier: tier.ordinal(),
            label: tier.label().to_string(),
            color: tier.color().to_string(),
        }
    }
}
