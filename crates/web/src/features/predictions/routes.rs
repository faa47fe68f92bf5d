use axum::{Router, routing::post};
use storage::Database;

use super::handlers::resolve_prediction;

pub fn routes() -> Router<Database> {
    Router::new().route("/:id/resolve", post(resolve_prediction))
}
