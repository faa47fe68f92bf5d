pub mod common;
pub mod influencer;
pub mod leaderboard;
pub mod prediction;
