use axum::Router;
use storage::Database;

use crate::features::{influencers, leaderboard, predictions};

pub fn api() -> Router<Database> {
    Router::new()
        .nest("/api/leaderboard", leaderboard::routes::routes())
        .nest("/api/influencers", influencers::routes::routes())
        .nest("/api/predictions", predictions::routes::routes())
}
