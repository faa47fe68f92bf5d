use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::PredictionStore;
use crate::error::{Result, StorageError};
use crate::models::Prediction;

/// Prediction store backed by a shared vector kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryPredictionStore {
    predictions: Arc<RwLock<Vec<Prediction>>>,
}

impl InMemoryPredictionStore {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self {
            predictions: Arc::new(RwLock::new(predictions)),
        }
    }

    // A panic while holding the lock cannot leave a half-written prediction,
    // so a poisoned lock is still safe to use.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Prediction>> {
        self.predictions.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Prediction>> {
        self.predictions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl PredictionStore for InMemoryPredictionStore {
    fn list_predictions(&self, influencer_id: Option<Uuid>) -> Vec<Prediction> {
        self.read()
            .iter()
            .filter(|p| influencer_id.is_none_or(|id| p.influencer_id == id))
            .cloned()
            .collect()
    }

    fn get_prediction(&self, id: Uuid) -> Result<Prediction> {
        self.read()
            .iter()
            .find(|p| p.prediction_id == id)
            .cloned()
            .ok_or_else(|| StorageError::prediction_not_found(id))
    }
}
