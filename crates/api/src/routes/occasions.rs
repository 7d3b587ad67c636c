//! Occasion JSON endpoints
//!
//! All handlers except `extract` act on the authenticated user's occasions
//! only; somebody else's occasion answers 404.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vibekeeper_domain::{ExtractedOccasion, NewOccasion, Occasion, OccasionFilter, OccasionPatch};

use crate::context::SharedContext;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct RawInputRequest {
    pub raw_input: String,
}

/// An occasion plus values computed against today's date
#[derive(Debug, Serialize)]
pub struct OccasionResponse {
    #[serde(flatten)]
    pub occasion: Occasion,
    pub days_until: i64,
    pub is_upcoming: bool,
}

impl OccasionResponse {
    pub fn new(occasion: Occasion, today: NaiveDate) -> Self {
        Self {
            days_until: occasion.days_until(today),
            is_upcoming: occasion.is_upcoming(today),
            occasion,
        }
    }
}

fn respond_many(ctx: &SharedContext, occasions: Vec<Occasion>) -> Json<Vec<OccasionResponse>> {
    let today = ctx.occasions.today();
    Json(occasions.into_iter().map(|occasion| OccasionResponse::new(occasion, today)).collect())
}

fn respond_one(ctx: &SharedContext, occasion: Occasion) -> Json<OccasionResponse> {
    Json(OccasionResponse::new(occasion, ctx.occasions.today()))
}

/// Preview what would be extracted from a sentence; nothing is stored.
pub async fn extract(
    State(ctx): State<SharedContext>,
    payload: Result<Json<RawInputRequest>, JsonRejection>,
) -> Result<Json<ExtractedOccasion>, ApiError> {
    let Json(request) = payload?;
    let extracted = ctx.occasions.extract(&request.raw_input).await?;
    Ok(Json(extracted))
}

pub async fn quick_add(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<RawInputRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OccasionResponse>), ApiError> {
    let Json(request) = payload?;
    let occasion = ctx.occasions.quick_add(user.id, &request.raw_input).await?;
    Ok((StatusCode::CREATED, respond_one(&ctx, occasion)))
}

pub async fn create(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewOccasion>, JsonRejection>,
) -> Result<(StatusCode, Json<OccasionResponse>), ApiError> {
    let Json(new_occasion) = payload?;
    let occasion = ctx.occasions.create(user.id, new_occasion).await?;
    Ok((StatusCode::CREATED, respond_one(&ctx, occasion)))
}

pub async fn list(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    filter: Result<Query<OccasionFilter>, QueryRejection>,
) -> Result<Json<Vec<OccasionResponse>>, ApiError> {
    let Query(filter) = filter?;
    let occasions = ctx.occasions.list(user.id, filter).await?;
    Ok(respond_many(&ctx, occasions))
}

pub async fn get(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OccasionResponse>, ApiError> {
    let Path(id) = id?;
    let occasion = ctx.occasions.get(user.id, id).await?;
    Ok(respond_one(&ctx, occasion))
}

pub async fn update(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<OccasionPatch>, JsonRejection>,
) -> Result<Json<OccasionResponse>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let occasion = ctx.occasions.update(user.id, id, patch).await?;
    Ok(respond_one(&ctx, occasion))
}

pub async fn delete(
    State(ctx): State<SharedContext>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.occasions.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
