use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Invalid score: {0} is outside the 0-100 scoring domain")]
    InvalidScore(f64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn influencer_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "Influencer",
            id,
        }
    }

    pub fn prediction_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "Prediction",
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
