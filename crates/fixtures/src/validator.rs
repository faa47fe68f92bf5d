use std::collections::HashSet;

use tracing::warn;
use validator::Validate;

use super::models::{FORMAT_VERSION, FixtureSet};
use crate::{FixtureError, Result};

pub struct FixtureValidator;

impl FixtureValidator {
    pub fn validate(fixtures: &FixtureSet) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if fixtures.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                fixtures.format_version, FORMAT_VERSION
            ));
        }

        if fixtures.influencers.is_empty() {
            report
                .errors
                .push("At least one influencer is required".to_string());
        }

        let mut influencer_ids = HashSet::new();
        let mut handles = HashSet::new();
        for influencer in &fixtures.influencers {
            if let Err(errors) = influencer.validate() {
                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        report.errors.push(format!(
                            "Influencer {}: {}: {}",
                            influencer.id,
                            field,
                            error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| error.code.to_string())
                        ));
                    }
                }
            }

            if !influencer_ids.insert(influencer.id) {
                report
                    .errors
                    .push(format!("Duplicate influencer id: {}", influencer.id));
            }
            if !handles.insert(influencer.handle.to_lowercase()) {
                report
                    .warnings
                    .push(format!("Handle '{}' is used more than once", influencer.handle));
            }
            if influencer.followers == 0 {
                report
                    .warnings
                    .push(format!("Influencer '{}' has no followers", influencer.handle));
            }
        }

        let mut prediction_ids = HashSet::new();
        let mut influencers_with_predictions = HashSet::new();
        for prediction in &fixtures.predictions {
            let label = format!("Prediction {}", prediction.id);

            if !prediction_ids.insert(prediction.id) {
                report
                    .errors
                    .push(format!("Duplicate prediction id: {}", prediction.id));
            }

            if !influencer_ids.contains(&prediction.influencer_id) {
                report.errors.push(format!(
                    "{} references unknown influencer {}",
                    label, prediction.influencer_id
                ));
            }
            influencers_with_predictions.insert(prediction.influencer_id);

            if prediction.coin_symbol.trim().is_empty() {
                report
                    .errors
                    .push(format!("{} has an empty coin symbol", label));
            }

            if prediction.status.is_resolved() {
                if prediction.realized_return.is_none() {
                    report
                        .errors
                        .push(format!("{} is resolved but has no realized return", label));
                }
                match prediction.resolved_at {
                    None => report
                        .warnings
                        .push(format!("{} is resolved but has no resolution time", label)),
                    Some(resolved_at) if resolved_at < prediction.predicted_at => report
                        .errors
                        .push(format!("{} is resolved before it was made", label)),
                    Some(_) => {}
                }
            } else if prediction.realized_return.is_some() || prediction.resolved_at.is_some() {
                report.errors.push(format!(
                    "{} is pending but carries resolution data",
                    label
                ));
            }

            if prediction
                .target_price
                .is_some_and(|price| price.is_sign_negative())
            {
                report
                    .errors
                    .push(format!("{} has a negative target price", label));
            }
        }

        for influencer in &fixtures.influencers {
            if !influencers_with_predictions.contains(&influencer.id) {
                report.warnings.push(format!(
                    "Influencer '{}' has no predictions",
                    influencer.handle
                ));
            }
        }

        if !report.errors.is_empty() {
            Err(FixtureError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
