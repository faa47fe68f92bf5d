use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Prediction, TimeRange};

/// Outcome counts and derived figures for one influencer's predictions.
///
/// `correct_count + incorrect_count + pending_count == total_count` always holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub pending_count: u32,
    pub total_count: u32,
    /// Percentage of resolved predictions that were correct, one decimal
    pub accuracy: f64,
    /// Mean realized return over resolved predictions, 0 when none resolved
    pub average_return: f64,
    pub current_streak: u32,
    pub top_coins: Vec<CoinBreakdown>,
}

impl PredictionStats {
    pub fn resolved_count(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoinBreakdown {
    pub coin_symbol: String,
    pub count: u32,
    pub accuracy: f64,
}

#[derive(Default)]
struct CoinTally {
    count: u32,
    resolved: u32,
    correct: u32,
}

/// Reduces one influencer's predictions to counts, a per-coin breakdown and
/// the average realized return.
///
/// Coins are ordered by prediction count, descending; equal counts keep the
/// order in which the coin was first seen.
pub fn aggregate_predictions<'a, I>(predictions: I) -> PredictionStats
where
    I: IntoIterator<Item = &'a Prediction>,
{
    let mut stats = PredictionStats::default();
    let mut coin_order: Vec<&'a str> = Vec::new();
    let mut coins: HashMap<&'a str, CoinTally> = HashMap::new();
    let mut resolved: Vec<&'a Prediction> = Vec::new();
    let mut return_sum = Decimal::ZERO;
    let mut return_count = 0u32;

    for prediction in predictions {
        stats.total_count += 1;

        let tally = coins
            .entry(prediction.coin_symbol.as_str())
            .or_insert_with(|| {
                coin_order.push(prediction.coin_symbol.as_str());
                CoinTally::default()
            });
        tally.count += 1;

        if !prediction.is_resolved() {
            stats.pending_count += 1;
            continue;
        }

        tally.resolved += 1;
        if prediction.is_correct() {
            tally.correct += 1;
            stats.correct_count += 1;
        } else {
            stats.incorrect_count += 1;
        }

        if let Some(realized) = prediction.realized_return {
            return_sum += realized;
            return_count += 1;
        }
        resolved.push(prediction);
    }

    let mut top_coins: Vec<CoinBreakdown> = coin_order
        .into_iter()
        .map(|symbol| {
            let tally = &coins[symbol];
            CoinBreakdown {
                coin_symbol: symbol.to_string(),
                count: tally.count,
                accuracy: percentage(tally.correct, tally.resolved),
            }
        })
        .collect();
    top_coins.sort_by(|a, b| b.count.cmp(&a.count));

    stats.accuracy = percentage(stats.correct_count, stats.resolved_count());
    stats.average_return = mean(return_sum, return_count);
    stats.current_streak = current_streak(resolved);
    stats.top_coins = top_coins;
    stats
}

/// Aggregates only the predictions made inside `range`, measured back from `now`.
pub fn aggregate_in_range(
    predictions: &[Prediction],
    range: TimeRange,
    now: DateTime<Utc>,
) -> PredictionStats {
    aggregate_predictions(
        predictions
            .iter()
            .filter(|p| range.contains(p.predicted_at, now)),
    )
}

/// Consecutive correct calls counted back from the most recently made
/// resolved prediction.
pub fn current_streak<'a>(resolved: impl IntoIterator<Item = &'a Prediction>) -> u32 {
    let mut resolved: Vec<&Prediction> = resolved.into_iter().filter(|p| p.is_resolved()).collect();
    resolved.sort_by(|a, b| b.predicted_at.cmp(&a.predicted_at));

    resolved.iter().take_while(|p| p.is_correct()).count() as u32
}

/// `part / whole` as a percentage rounded to one decimal, 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn mean(sum: Decimal, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }

    (sum / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
