pub mod influencer;
pub mod prediction;
pub mod time_range;

pub use influencer::{Influencer, Platform};
pub use prediction::{Direction, Outcome, Prediction, PredictionStatus};
pub use time_range::TimeRange;
