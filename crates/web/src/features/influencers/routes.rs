use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_influencer, list_influencer_predictions, list_influencers};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_influencers))
        .route("/:id", get(get_influencer))
        .route("/:id/predictions", get(list_influencer_predictions))
}
