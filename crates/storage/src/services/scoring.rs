use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, StorageError};
use crate::models::Prediction;
use crate::services::aggregation::current_streak;

/// Upper bound of the scoring domain
pub const MAX_SCORE: f64 = 100.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weight of each score component. Weights are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    accuracy: f64,
    consistency: f64,
    volume: f64,
    recency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            accuracy: 0.50,
            consistency: 0.20,
            volume: 0.15,
            recency: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn new(accuracy: f64, consistency: f64, volume: f64, recency: f64) -> Result<Self> {
        let weights = Self {
            accuracy,
            consistency,
            volume,
            recency,
        };
        weights.validate()?;
        Ok(weights)
    }

    fn validate(&self) -> Result<()> {
        let parts = [self.accuracy, self.consistency, self.volume, self.recency];

        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(StorageError::Validation(format!(
                "score weights must be finite and non-negative, got {:?}",
                parts
            )));
        }

        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(StorageError::Validation(format!(
                "score weights must sum to 1, got {}",
                sum
            )));
        }

        Ok(())
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn consistency(&self) -> f64 {
        self.consistency
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn recency(&self) -> f64 {
        self.recency
    }
}

/// Scoring policy: component weights plus the points at which the
/// consistency and volume components saturate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Streak length that earns the full consistency component
    pub streak_saturation: u32,
    /// Resolved prediction count that earns the full volume component
    pub volume_saturation: u32,
    /// Resolved predictions made within this many days count as recent
    pub recency_window_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            streak_saturation: 10,
            volume_saturation: 50,
            recency_window_days: 30,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.streak_saturation == 0 || self.volume_saturation == 0 {
            return Err(StorageError::Validation(
                "streak and volume saturation must be at least 1".to_string(),
            ));
        }
        if self.recency_window_days == 0 {
            return Err(StorageError::Validation(
                "recency window must be at least one day".to_string(),
            ));
        }

        Ok(())
    }

    pub fn recency_window(&self) -> Duration {
        Duration::days(self.recency_window_days as i64)
    }
}

/// Resolved-prediction counters feeding the scorer. Pending predictions never
/// contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringInput {
    pub resolved: u32,
    pub correct: u32,
    pub streak: u32,
    pub recent_resolved: u32,
}

impl ScoringInput {
    pub fn from_predictions<'a>(
        predictions: impl IntoIterator<Item = &'a Prediction>,
        config: &ScoringConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let resolved: Vec<&Prediction> = predictions
            .into_iter()
            .filter(|p| p.is_resolved())
            .collect();
        let recent_cutoff = now - config.recency_window();

        Self {
            resolved: resolved.len() as u32,
            correct: resolved.iter().filter(|p| p.is_correct()).count() as u32,
            streak: current_streak(resolved.iter().copied()),
            recent_resolved: resolved
                .iter()
                .filter(|p| p.predicted_at >= recent_cutoff)
                .count() as u32,
        }
    }
}

/// Weighted score split into its four components.
///
/// `total == accuracy + consistency + volume + recency` up to floating-point
/// rounding, each component is non-negative and the total lies in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub accuracy: f64,
    pub consistency: f64,
    pub volume: f64,
    pub recency: f64,
    pub total: f64,
}

pub fn score_influencer(input: &ScoringInput, config: &ScoringConfig) -> ScoreBreakdown {
    let weights = &config.weights;

    let accuracy_ratio = ratio(input.correct, input.resolved);
    let consistency_ratio = ratio(
        input.streak.min(config.streak_saturation),
        config.streak_saturation,
    );
    let volume_ratio = ratio(
        input.resolved.min(config.volume_saturation),
        config.volume_saturation,
    );
    let recency_ratio = ratio(input.recent_resolved, input.resolved);

    let accuracy = weights.accuracy * accuracy_ratio * MAX_SCORE;
    let consistency = weights.consistency * consistency_ratio * MAX_SCORE;
    let volume = weights.volume * volume_ratio * MAX_SCORE;
    let recency = weights.recency * recency_ratio * MAX_SCORE;

    ScoreBreakdown {
        accuracy,
        consistency,
        volume,
        recency,
        // rounding can push a perfect record a hair past the ceiling
        total: (accuracy + consistency + volume + recency).clamp(0.0, MAX_SCORE),
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, PredictionStatus};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn assert_sums(breakdown: &ScoreBreakdown) {
        let sum =
            breakdown.accuracy + breakdown.consistency + breakdown.volume + breakdown.recency;
        assert!((sum - breakdown.total).abs() < 1e-6);
        assert!(breakdown.accuracy >= 0.0);
        assert!(breakdown.consistency >= 0.0);
        assert!(breakdown.volume >= 0.0);
        assert!(breakdown.recency >= 0.0);
        assert!((0.0..=MAX_SCORE).contains(&breakdown.total));
    }

    #[test]
    fn test_default_weights_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(ScoreWeights::new(0.5, 0.2, 0.2, 0.2).is_err());
        assert!(ScoreWeights::new(0.6, 0.2, 0.1, 0.1).is_ok());
    }

    #[test]
    fn test_negative_or_nan_weight_rejected() {
        assert!(ScoreWeights::new(1.2, -0.2, 0.0, 0.0).is_err());
        assert!(ScoreWeights::new(f64::NAN, 0.5, 0.25, 0.25).is_err());
    }

    #[test]
    fn test_zero_saturation_rejected() {
        let config = ScoringConfig {
            streak_saturation: 0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_perfect_record_scores_maximum() {
        let input = ScoringInput {
            resolved: 60,
            correct: 60,
            streak: 60,
            recent_resolved: 60,
        };

        let breakdown = score_influencer(&input, &ScoringConfig::default());

        assert!((breakdown.total - 100.0).abs() < 1e-9);
        assert!((breakdown.accuracy - 50.0).abs() < 1e-9);
        assert_sums(&breakdown);
    }

    #[test]
    fn test_no_resolved_predictions_scores_zero() {
        let breakdown = score_influencer(&ScoringInput::default(), &ScoringConfig::default());
        assert_eq!(breakdown, ScoreBreakdown::default());
    }

    #[test]
    fn test_components_sum_to_total() {
        let config = ScoringConfig::default();
        for resolved in 0..40u32 {
            for correct in 0..=resolved {
                let input = ScoringInput {
                    resolved,
                    correct,
                    streak: correct % 13,
                    recent_resolved: resolved / 3,
                };
                assert_sums(&score_influencer(&input, &config));
            }
        }
    }

    #[test]
    fn test_partial_record() {
        let input = ScoringInput {
            resolved: 10,
            correct: 7,
            streak: 5,
            recent_resolved: 5,
        };

        let breakdown = score_influencer(&input, &ScoringConfig::default());

        assert!((breakdown.accuracy - 35.0).abs() < 1e-9);
        assert!((breakdown.consistency - 10.0).abs() < 1e-9);
        assert!((breakdown.volume - 3.0).abs() < 1e-9);
        assert!((breakdown.recency - 7.5).abs() < 1e-9);
        assert!((breakdown.total - 55.5).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights_change_balance() {
        let config = ScoringConfig::with_weights(ScoreWeights::new(1.0, 0.0, 0.0, 0.0).unwrap());
        let input = ScoringInput {
            resolved: 4,
            correct: 3,
            streak: 3,
            recent_resolved: 4,
        };

        let breakdown = score_influencer(&input, &config);

        assert!((breakdown.total - 75.0).abs() < 1e-9);
        assert_eq!(breakdown.recency, 0.0);
    }

    #[test]
    fn test_input_ignores_pending_predictions() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let make = |status, days_ago| Prediction {
            prediction_id: Uuid::new_v4(),
            influencer_id: Uuid::nil(),
            coin_symbol: "ETH".to_string(),
            direction: Direction::Bearish,
            target_price: None,
            predicted_at: now - Duration::days(days_ago),
            status,
            resolved_at: None,
            realized_return: None,
        };
        let predictions = vec![
            make(PredictionStatus::Correct, 90),
            make(PredictionStatus::Incorrect, 60),
            make(PredictionStatus::Correct, 10),
            make(PredictionStatus::Correct, 5),
            make(PredictionStatus::Pending, 1),
        ];

        let input = ScoringInput::from_predictions(&predictions, &ScoringConfig::default(), now);

        assert_eq!(
            input,
            ScoringInput {
                resolved: 4,
                correct: 3,
                streak: 2,
                recent_resolved: 2,
            }
        );
    }
}
