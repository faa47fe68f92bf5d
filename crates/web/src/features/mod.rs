pub mod influencers;
pub mod leaderboard;
pub mod predictions;
