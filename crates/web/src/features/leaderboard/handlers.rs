use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        leaderboard::{HighlightParams, LeaderboardEntry, LeaderboardParams},
    },
};

use super::services;

/// Unknown `sortBy`, `order` or `timeRange` values fall back to their
/// defaults instead of failing the request.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Leaderboard page retrieved successfully", body = PaginatedResponse<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Query(params): Query<LeaderboardParams>,
) -> Response {
    Json(services::get_leaderboard(&db, &params, Utc::now())).into_response()
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/top-performers",
    params(HighlightParams),
    responses(
        (status = 200, description = "Highest ranked influencers", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_top_performers(
    State(db): State<Database>,
    Query(params): Query<HighlightParams>,
) -> Response {
    Json(services::get_top_performers(&db, params.limit.as_deref(), Utc::now())).into_response()
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/hottest-streaks",
    params(HighlightParams),
    responses(
        (status = 200, description = "Longest current winning streaks", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_hottest_streaks(
    State(db): State<Database>,
    Query(params): Query<HighlightParams>,
) -> Response {
    Json(services::get_hottest_streaks(&db, params.limit.as_deref(), Utc::now())).into_response()
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/biggest-gainers",
    params(HighlightParams),
    responses(
        (status = 200, description = "Highest average realized return", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_biggest_gainers(
    State(db): State<Database>,
    Query(params): Query<HighlightParams>,
) -> Response {
    Json(services::get_biggest_gainers(&db, params.limit.as_deref(), Utc::now())).into_response()
}
