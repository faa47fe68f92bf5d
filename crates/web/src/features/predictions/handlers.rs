use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{Database, dto::prediction::ResolvePredictionRequest, models::Prediction};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    post,
    path = "/api/predictions/{id}/resolve",
    params(
        ("id" = Uuid, Path, description = "Prediction ID")
    ),
    request_body = ResolvePredictionRequest,
    responses(
        (status = 200, description = "Prediction resolved and influencer rescored", body = Prediction),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Prediction not found"),
        (status = 409, description = "Prediction already resolved")
    ),
    tag = "predictions"
)]
pub async fn resolve_prediction(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResolvePredictionRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let prediction = services::resolve_prediction(&db, id, &req, Utc::now())?;

    Ok(Json(prediction).into_response())
}
