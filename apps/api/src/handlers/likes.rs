use axum::Json;
use axum::extract::{Path, State};
use garden_application::CastVoteInput;
use garden_core::AppError;
use tracing::{debug, info};

use crate::dto::{LikeStatusResponse, VoteResponse};
use crate::error::{ApiError, ApiResult};
use crate::request_context::RequestContext;
use crate::state::AppState;

pub async fn like_status_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    context: RequestContext,
) -> ApiResult<Json<LikeStatusResponse>> {
    let status = state
        .like_service
        .like_status(&slug, &context.client_ip)
        .await?;

    Ok(Json(LikeStatusResponse {
        count: status.count,
        has_voted: status.has_voted,
    }))
}

pub async fn cast_vote_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    context: RequestContext,
) -> ApiResult<Json<VoteResponse>> {
    let RequestContext { client_ip, origin } = context;

    let receipt = state
        .like_service
        .cast_vote(CastVoteInput {
            slug: slug.clone(),
            origin,
            client_ip: client_ip.clone(),
        })
        .await
        .map_err(|error| {
            debug!(%slug, %client_ip, %error, "vote rejected");
            ApiError::mutation(error)
        })?;

    info!(%slug, count = receipt.count, "vote recorded");

    Ok(Json(VoteResponse {
        count: receipt.count,
        success: true,
    }))
}

pub async fn missing_slug_handler() -> ApiError {
    AppError::Validation("Slug is required".to_owned()).into()
}
