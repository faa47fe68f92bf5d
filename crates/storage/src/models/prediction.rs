use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

impl PredictionStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Result of a resolution, as reported by the resolution collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl From<Outcome> for PredictionStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => PredictionStatus::Correct,
            Outcome::Incorrect => PredictionStatus::Incorrect,
        }
    }
}

/// A recorded call by an influencer.
///
/// Immutable apart from the single pending -> correct/incorrect transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub prediction_id: Uuid,
    pub influencer_id: Uuid,
    pub coin_symbol: String,
    pub direction: Direction,
    pub target_price: Option<Decimal>,
    pub predicted_at: DateTime<Utc>,
    pub status: PredictionStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Realized percentage return, only present once resolved
    pub realized_return: Option<Decimal>,
}

impl Prediction {
    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    pub fn is_correct(&self) -> bool {
        self.status == PredictionStatus::Correct
    }

    pub fn resolve(
        &mut self,
        outcome: Outcome,
        realized_return: Decimal,
        resolved_at: DateTime<Utc>,
    ) -> Result<()> {
        if self.is_resolved() {
            return Err(StorageError::ConstraintViolation(format!(
                "prediction {} is already resolved",
                self.prediction_id
            )));
        }

        self.status = outcome.into();
        self.realized_return = Some(realized_return);
        self.resolved_at = Some(resolved_at);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn pending() -> Prediction {
        Prediction {
            prediction_id: Uuid::new_v4(),
            influencer_id: Uuid::new_v4(),
            coin_symbol: "BTC".to_string(),
            direction: Direction::Bullish,
            target_price: Some(dec!(100000)),
            predicted_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            status: PredictionStatus::Pending,
            resolved_at: None,
            realized_return: None,
        }
    }

    #[test]
    fn test_resolve_pending_prediction() {
        let mut prediction = pending();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        prediction.resolve(Outcome::Correct, dec!(12.5), at).unwrap();

        assert_eq!(prediction.status, PredictionStatus::Correct);
        assert_eq!(prediction.realized_return, Some(dec!(12.5)));
        assert_eq!(prediction.resolved_at, Some(at));
    }

    #[test]
    fn test_resolve_twice_is_rejected() {
        let mut prediction = pending();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        prediction.resolve(Outcome::Incorrect, dec!(-4), at).unwrap();

        let err = prediction.resolve(Outcome::Correct, dec!(8), at).unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
        assert_eq!(prediction.status, PredictionStatus::Incorrect);
    }
}
