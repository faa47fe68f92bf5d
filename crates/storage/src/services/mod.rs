pub mod aggregation;
pub mod feed;
pub mod leaderboard;
pub mod profile;
pub mod resolution;
pub mod scoring;
pub mod selectors;
pub mod tiering;
pub mod views;

pub use aggregation::{PredictionStats, aggregate_predictions};
pub use leaderboard::query_leaderboard;
pub use scoring::{ScoreBreakdown, ScoreWeights, ScoringConfig, score_influencer};
pub use selectors::{biggest_gainers, hottest_streaks, top_performers};
pub use tiering::{Tier, classify_tier};
pub use views::LeaderboardService;
