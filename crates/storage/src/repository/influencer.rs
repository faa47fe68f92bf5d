use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::InfluencerStore;
use crate::error::{Result, StorageError};
use crate::models::Influencer;

/// Influencer store backed by a shared vector kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryInfluencerStore {
    influencers: Arc<RwLock<Vec<Influencer>>>,
}

impl InMemoryInfluencerStore {
    pub fn new(influencers: Vec<Influencer>) -> Self {
        Self {
            influencers: Arc::new(RwLock::new(influencers)),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Influencer>> {
        self.influencers.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Influencer>> {
        self.influencers
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

impl InfluencerStore for InMemoryInfluencerStore {
    fn list_influencers(&self) -> Vec<Influencer> {
        self.read().clone()
    }

    fn get_influencer(&self, id: Uuid) -> Result<Influencer> {
        self.read()
            .iter()
            .find(|i| i.influencer_id == id)
            .cloned()
            .ok_or_else(|| StorageError::influencer_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    #[test]
    fn test_get_influencer_by_id() {
        let influencer = Influencer::new(Uuid::new_v4(), Platform::Twitter, "moon", "Moon", 42);
        let id = influencer.influencer_id;
        let store = InMemoryInfluencerStore::new(vec![influencer]);

        assert_eq!(store.get_influencer(id).unwrap().handle, "moon");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_influencer_is_not_found() {
        let store = InMemoryInfluencerStore::default();

        let err = store.get_influencer(Uuid::new_v4()).unwrap_err();

        assert!(matches!(
            err,
            StorageError::NotFound {
                entity: "Influencer",
                ..
            }
        ));
    }
}
