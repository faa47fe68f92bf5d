use chrono::{DateTime, Utc};

use crate::models::{Influencer, Prediction};
use crate::services::aggregation::current_streak;
use crate::services::scoring::{ScoreBreakdown, ScoringConfig, ScoringInput, score_influencer};

/// Refreshes an influencer's counters and score from its own predictions.
///
/// Only resolved predictions influence the score; pending ones only count
/// toward `total_predictions`.
pub fn rescore_influencer<'a>(
    influencer: &mut Influencer,
    predictions: impl IntoIterator<Item = &'a Prediction>,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let owned: Vec<&Prediction> = predictions
        .into_iter()
        .filter(|p| p.influencer_id == influencer.influencer_id)
        .collect();

    let input = ScoringInput::from_predictions(owned.iter().copied(), config, now);
    let breakdown = score_influencer(&input, config);

    influencer.total_predictions = owned.len() as u32;
    influencer.resolved_predictions = input.resolved;
    influencer.correct_predictions = input.correct;
    influencer.current_streak = current_streak(owned.iter().copied());
    influencer.score = breakdown.total;

    breakdown
}

/// Assigns ranks 1..=n: score descending, then resolved count descending,
/// then handle ascending.
pub fn assign_ranks(influencers: &mut [Influencer]) {
    let mut order: Vec<usize> = (0..influencers.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&influencers[a], &influencers[b]);
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.resolved_predictions.cmp(&a.resolved_predictions))
            .then_with(|| a.handle.cmp(&b.handle))
    });

    for (position, index) in order.into_iter().enumerate() {
        influencers[index].rank = position as u32 + 1;
    }
}
