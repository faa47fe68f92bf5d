use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::common::{PaginatedResponse, Pagination, parse_lenient};
use crate::dto::prediction::PredictionFeedParams;
use crate::models::{Prediction, TimeRange};

/// Predictions inside the requested range, newest first. `influencer_id`
/// narrows the feed to one influencer.
pub fn prediction_feed(
    predictions: &[Prediction],
    influencer_id: Option<Uuid>,
    params: &PredictionFeedParams,
    now: DateTime<Utc>,
) -> PaginatedResponse<Prediction> {
    let time_range: TimeRange = params
        .time_range
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    let pagination = Pagination::clamped(
        parse_lenient(params.page.as_deref()),
        parse_lenient(params.page_size.as_deref()),
    );

    let mut selected: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| influencer_id.is_none_or(|id| p.influencer_id == id))
        .filter(|p| time_range.contains(p.predicted_at, now))
        .collect();
    selected.sort_by(|a, b| b.predicted_at.cmp(&a.predicted_at));

    PaginatedResponse::paginate(selected, pagination).map(Prediction::clone)
}
