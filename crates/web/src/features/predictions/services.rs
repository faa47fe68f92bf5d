use chrono::{DateTime, Utc};
use storage::{
    Database, dto::prediction::ResolvePredictionRequest, error::Result, models::Prediction,
};
use uuid::Uuid;

/// Resolve a pending prediction and rescore its influencer
pub fn resolve_prediction(
    db: &Database,
    prediction_id: Uuid,
    req: &ResolvePredictionRequest,
    now: DateTime<Utc>,
) -> Result<Prediction> {
    let realized_return = req.realized_return_decimal()?;
    db.resolve_prediction(prediction_id, req.outcome, realized_return, now)
}
