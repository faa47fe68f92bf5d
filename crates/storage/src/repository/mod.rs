pub mod influencer;
pub mod prediction;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Influencer, Outcome, Prediction};
use crate::services::resolution::{assign_ranks, rescore_influencer};
use crate::services::scoring::ScoringConfig;

pub use influencer::InMemoryInfluencerStore;
pub use prediction::InMemoryPredictionStore;

/// Read access to recorded predictions.
pub trait PredictionStore: Send + Sync {
    /// All predictions, or only those of one influencer, in insertion order
    fn list_predictions(&self, influencer_id: Option<Uuid>) -> Vec<Prediction>;

    fn get_prediction(&self, id: Uuid) -> Result<Prediction>;
}

/// Read access to influencers and their running counters.
pub trait InfluencerStore: Send + Sync {
    fn list_influencers(&self) -> Vec<Influencer>;

    fn get_influencer(&self, id: Uuid) -> Result<Influencer>;
}

/// Influencers and predictions read together at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub influencers: Vec<Influencer>,
    pub predictions: Vec<Prediction>,
}

/// Reads spanning both stores. Implementations must not let a write land
/// between the influencer read and the prediction read.
pub trait SnapshotStore: Send + Sync {
    fn snapshot(&self) -> Snapshot;

    /// One influencer and its own predictions
    fn influencer_snapshot(&self, id: Uuid) -> Result<(Influencer, Vec<Prediction>)>;
}

/// Handle over both stores plus the scoring policy. Cloning is cheap and
/// every clone sees the same data.
///
/// Reads hand out point-in-time snapshots. Writes that touch both stores
/// lock predictions first, then influencers.
#[derive(Clone)]
pub struct Database {
    influencers: InMemoryInfluencerStore,
    predictions: InMemoryPredictionStore,
    scoring: ScoringConfig,
}

impl Database {
    pub fn new(
        influencers: Vec<Influencer>,
        predictions: Vec<Prediction>,
        scoring: ScoringConfig,
    ) -> Result<Self> {
        scoring.validate()?;

        let influencer_ids: HashSet<Uuid> = influencers.iter().map(|i| i.influencer_id).collect();
        if influencer_ids.len() != influencers.len() {
            return Err(StorageError::ConstraintViolation(
                "duplicate influencer id".to_string(),
            ));
        }
        let mut prediction_ids = HashSet::with_capacity(predictions.len());
        if let Some(duplicate) = predictions
            .iter()
            .find(|p| !prediction_ids.insert(p.prediction_id))
        {
            return Err(StorageError::ConstraintViolation(format!(
                "duplicate prediction id {}",
                duplicate.prediction_id
            )));
        }
        if let Some(orphan) = predictions
            .iter()
            .find(|p| !influencer_ids.contains(&p.influencer_id))
        {
            return Err(StorageError::ConstraintViolation(format!(
                "prediction {} references unknown influencer {}",
                orphan.prediction_id, orphan.influencer_id
            )));
        }

        Ok(Self {
            influencers: InMemoryInfluencerStore::new(influencers),
            predictions: InMemoryPredictionStore::new(predictions),
            scoring,
        })
    }

    pub fn influencers(&self) -> &InMemoryInfluencerStore {
        &self.influencers
    }

    pub fn predictions(&self) -> &InMemoryPredictionStore {
        &self.predictions
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Recomputes every influencer's counters, score and rank.
    pub fn rescore_all(&self, now: DateTime<Utc>) {
        let predictions = self.predictions.read();
        let mut influencers = self.influencers.write();

        for influencer in influencers.iter_mut() {
            rescore_influencer(influencer, predictions.iter(), &self.scoring, now);
        }
        assign_ranks(&mut influencers);

        tracing::info!("Rescored {} influencers", influencers.len());
    }

    /// Resolves a pending prediction, then rescores its influencer and
    /// re-ranks everyone, all under the same locks.
    pub fn resolve_prediction(
        &self,
        prediction_id: Uuid,
        outcome: Outcome,
        realized_return: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Prediction> {
        let mut predictions = self.predictions.write();
        let mut influencers = self.influencers.write();

        let prediction_idx = predictions
            .iter()
            .position(|p| p.prediction_id == prediction_id)
            .ok_or_else(|| StorageError::prediction_not_found(prediction_id))?;
        let influencer_id = predictions[prediction_idx].influencer_id;
        let influencer_idx = influencers
            .iter()
            .position(|i| i.influencer_id == influencer_id)
            .ok_or_else(|| StorageError::influencer_not_found(influencer_id))?;

        predictions[prediction_idx].resolve(outcome, realized_return, now)?;
        let resolved = predictions[prediction_idx].clone();

        let breakdown = rescore_influencer(
            &mut influencers[influencer_idx],
            predictions.iter(),
            &self.scoring,
            now,
        );
        assign_ranks(&mut influencers);

        tracing::info!(
            "Resolved prediction {} as {:?}; influencer {} now scores {:.2}",
            prediction_id,
            outcome,
            influencer_id,
            breakdown.total
        );

        Ok(resolved)
    }
}

impl SnapshotStore for Database {
    fn snapshot(&self) -> Snapshot {
        let predictions = self.predictions.read();
        let influencers = self.influencers.read();

        Snapshot {
            influencers: influencers.clone(),
            predictions: predictions.clone(),
        }
    }

    fn influencer_snapshot(&self, id: Uuid) -> Result<(Influencer, Vec<Prediction>)> {
        let predictions = self.predictions.read();
        let influencers = self.influencers.read();

        let influencer = influencers
            .iter()
            .find(|i| i.influencer_id == id)
            .cloned()
            .ok_or_else(|| StorageError::influencer_not_found(id))?;
        let owned = predictions
            .iter()
            .filter(|p| p.influencer_id == id)
            .cloned()
            .collect();

        Ok((influencer, owned))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Direction, Platform, PredictionStatus};
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, Ordering};

    pub(crate) fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    pub(crate) fn call(influencer_id: Uuid, days_ago: i64, status: PredictionStatus) -> Prediction {
        Prediction {
            prediction_id: Uuid::new_v4(),
            influencer_id,
            coin_symbol: "BTC".to_string(),
            direction: Direction::Bullish,
            target_price: None,
            predicted_at: now() - Duration::days(days_ago),
            status,
            resolved_at: None,
            realized_return: match status {
                PredictionStatus::Pending => None,
                PredictionStatus::Correct => Some(dec!(15)),
                PredictionStatus::Incorrect => Some(dec!(-7)),
            },
        }
    }

    /// Two influencers: `alpha` with a strong record, `beta` with one pending call.
    pub(crate) fn sample_database() -> (Database, Uuid, Uuid, Uuid) {
        let alpha = Influencer::new(Uuid::new_v4(), Platform::Twitter, "alpha", "Alpha", 50_000);
        let beta = Influencer::new(Uuid::new_v4(), Platform::Youtube, "beta", "Beta", 8_000);
        let pending = call(beta.influencer_id, 1, PredictionStatus::Pending);
        let pending_id = pending.prediction_id;
        let predictions = vec![
            call(alpha.influencer_id, 12, PredictionStatus::Correct),
            call(alpha.influencer_id, 8, PredictionStatus::Correct),
            call(alpha.influencer_id, 3, PredictionStatus::Incorrect),
            pending,
        ];
        let (alpha_id, beta_id) = (alpha.influencer_id, beta.influencer_id);

        let db = Database::new(vec![alpha, beta], predictions, ScoringConfig::default()).unwrap();
        db.rescore_all(now());
        (db, alpha_id, beta_id, pending_id)
    }

    #[test]
    fn test_rescore_all_assigns_ranks() {
        let (db, alpha_id, beta_id, _) = sample_database();

        let alpha = db.influencers().get_influencer(alpha_id).unwrap();
        let beta = db.influencers().get_influencer(beta_id).unwrap();

        assert_eq!(alpha.rank, 1);
        assert_eq!(beta.rank, 2);
        assert_eq!(alpha.resolved_predictions, 3);
        assert_eq!(beta.total_predictions, 1);
        assert_eq!(beta.score, 0.0);
    }

    #[test]
    fn test_resolution_rescores_influencer() {
        let (db, _, beta_id, pending_id) = sample_database();

        let resolved = db
            .resolve_prediction(pending_id, Outcome::Correct, dec!(30), now())
            .unwrap();

        assert_eq!(resolved.status, PredictionStatus::Correct);
        let beta = db.influencers().get_influencer(beta_id).unwrap();
        assert_eq!(beta.resolved_predictions, 1);
        assert_eq!(beta.current_streak, 1);
        assert!(beta.score > 0.0);
        assert_eq!(
            db.predictions().get_prediction(pending_id).unwrap().realized_return,
            Some(dec!(30))
        );
    }

    #[test]
    fn test_resolving_twice_is_a_constraint_violation() {
        let (db, _, _, pending_id) = sample_database();
        db.resolve_prediction(pending_id, Outcome::Incorrect, dec!(-3), now())
            .unwrap();

        let err = db
            .resolve_prediction(pending_id, Outcome::Correct, dec!(5), now())
            .unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn test_resolving_unknown_prediction_is_not_found() {
        let (db, _, _, _) = sample_database();

        let err = db
            .resolve_prediction(Uuid::new_v4(), Outcome::Correct, dec!(1), now())
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_orphan_prediction_rejected() {
        let predictions = vec![call(Uuid::new_v4(), 1, PredictionStatus::Pending)];

        let result = Database::new(Vec::new(), predictions, ScoringConfig::default());

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[test]
    fn test_duplicate_prediction_id_rejected() {
        let influencer = Influencer::new(Uuid::new_v4(), Platform::Twitter, "dup", "Dup", 10);
        let first = call(influencer.influencer_id, 2, PredictionStatus::Pending);
        let mut second = call(influencer.influencer_id, 1, PredictionStatus::Pending);
        second.prediction_id = first.prediction_id;

        let result = Database::new(
            vec![influencer],
            vec![first, second],
            ScoringConfig::default(),
        );

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[test]
    fn test_failed_resolution_leaves_prediction_pending() {
        let (db, _, beta_id, pending_id) = sample_database();
        db.influencers.write().retain(|i| i.influencer_id != beta_id);

        let err = db
            .resolve_prediction(pending_id, Outcome::Correct, dec!(4), now())
            .unwrap_err();

        assert!(err.is_not_found());
        let untouched = db.predictions().get_prediction(pending_id).unwrap();
        assert_eq!(untouched.status, PredictionStatus::Pending);
        assert_eq!(untouched.realized_return, None);
    }

    #[test]
    fn test_influencer_snapshot() {
        let (db, alpha_id, _, _) = sample_database();

        let (alpha, predictions) = db.influencer_snapshot(alpha_id).unwrap();

        assert_eq!(alpha.handle, "alpha");
        assert_eq!(predictions.len(), 3);
        assert!(db.influencer_snapshot(Uuid::new_v4()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_snapshot_never_mixes_before_and_after_resolution() {
        let influencer = Influencer::new(Uuid::new_v4(), Platform::Telegram, "busy", "Busy", 100);
        let id = influencer.influencer_id;
        let predictions: Vec<Prediction> = (0..400)
            .map(|n| call(id, n % 30, PredictionStatus::Pending))
            .collect();
        let pending: Vec<Uuid> = predictions.iter().map(|p| p.prediction_id).collect();
        let db = Database::new(vec![influencer], predictions, ScoringConfig::default()).unwrap();
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for prediction_id in &pending {
                    db.resolve_prediction(*prediction_id, Outcome::Correct, dec!(1), now())
                        .unwrap();
                }
                done.store(true, Ordering::Release);
            });

            while !done.load(Ordering::Acquire) {
                let snapshot = db.snapshot();
                let correct = snapshot
                    .predictions
                    .iter()
                    .filter(|p| p.is_correct())
                    .count() as u32;
                assert_eq!(snapshot.influencers[0].correct_predictions, correct);
            }
        });

        assert_eq!(
            db.snapshot().influencers[0].correct_predictions,
            pending.len() as u32
        );
    }

    #[test]
    fn test_clones_share_state() {
        let (db, _, beta_id, pending_id) = sample_database();
        let handle = db.clone();

        handle
            .resolve_prediction(pending_id, Outcome::Correct, dec!(2), now())
            .unwrap();

        assert_eq!(
            db.influencers().get_influencer(beta_id).unwrap().correct_predictions,
            1
        );
    }
}
