use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        influencer::{DirectoryParams, InfluencerProfile},
        leaderboard::LeaderboardEntry,
        prediction::PredictionFeedParams,
    },
    models::Prediction,
};
use uuid::Uuid;

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/influencers",
    params(DirectoryParams),
    responses(
        (status = 200, description = "Influencer directory page", body = PaginatedResponse<LeaderboardEntry>)
    ),
    tag = "influencers"
)]
pub async fn list_influencers(
    State(db): State<Database>,
    Query(params): Query<DirectoryParams>,
) -> Response {
    Json(services::list_influencers(&db, &params, Utc::now())).into_response()
}

#[utoipa::path(
    get,
    path = "/api/influencers/{id}",
    params(
        ("id" = Uuid, Path, description = "Influencer ID")
    ),
    responses(
        (status = 200, description = "Influencer profile with score breakdown", body = InfluencerProfile),
        (status = 404, description = "Influencer not found")
    ),
    tag = "influencers"
)]
pub async fn get_influencer(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let profile = services::get_influencer_profile(&db, id, Utc::now())?;

    Ok(Json(profile).into_response())
}

#[utoipa::path(
    get,
    path = "/api/influencers/{id}/predictions",
    params(
        ("id" = Uuid, Path, description = "Influencer ID"),
        PredictionFeedParams
    ),
    responses(
        (status = 200, description = "Predictions, newest first", body = PaginatedResponse<Prediction>),
        (status = 404, description = "Influencer not found")
    ),
    tag = "influencers"
)]
pub async fn list_influencer_predictions(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Query(params): Query<PredictionFeedParams>,
) -> ApiResult<Response> {
    let feed = services::list_influencer_predictions(&db, id, &params, Utc::now())?;

    Ok(Json(feed).into_response())
}
