use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::Outcome;

/// Query for an influencer's prediction feed
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PredictionFeedParams {
    /// One of 7d, 30d, 90d, 1y, all
    pub time_range: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Request payload for resolving a pending prediction
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePredictionRequest {
    pub outcome: Outcome,

    /// Realized percentage return; a position cannot lose more than 100%
    #[validate(range(
        min = -100.0,
        max = 100000.0,
        message = "Realized return must be between -100 and 100000 percent"
    ))]
    pub realized_return: f64,
}

impl ResolvePredictionRequest {
    pub fn realized_return_decimal(&self) -> Result<Decimal> {
        Decimal::from_f64_retain(self.realized_return)
            .map(|d| d.round_dp(4))
            .ok_or_else(|| {
                StorageError::Validation(format!(
                    "realized return {} is not representable",
                    self.realized_return
                ))
            })
    }
}
