use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    get_biggest_gainers, get_hottest_streaks, get_leaderboard, get_top_performers,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/top-performers", get(get_top_performers))
        .route("/hottest-streaks", get(get_hottest_streaks))
        .route("/biggest-gainers", get(get_biggest_gainers))
}
