//! Review API handlers
//!
//! Listings are addressed with 1-indexed `pageNo`/`pageSize` query
//! parameters; mutations require the authenticated caller resolved by the
//! auth middleware.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::reviews::{ReviewInput, ReviewPatch};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use revue_core::PageRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters for paginated listings
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Page number (1-indexed)
    pub page_no: Option<u64>,

    /// Items per page
    pub page_size: Option<u64>,
}

impl PageParams {
    fn to_request(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.page_no.unwrap_or(1), self.page_size.unwrap_or(10))
            .map_err(AppError::from)
    }
}

/// Delete confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteReviewResponse {
    pub message: String,
}

/// List reviews for an album, newest first
#[utoipa::path(
    get,
    path = "/api/reviews/album/{albumId}",
    tag = "reviews",
    params(
        ("albumId" = String, Path, description = "Album id"),
        PageParams,
    ),
    responses(
        (status = 200, description = "One page of reviews for the album"),
        (status = 400, description = "Invalid paging parameters", body = crate::error::ApiError),
    )
)]
pub async fn list_by_album(
    State(state): State<Arc<AppState>>,
    Path(album_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.to_request()?;
    let response = state.reviews.list_by_album(&album_id, page).await?;

    Ok(Json(response))
}

/// List a user's reviews with album metadata, newest first
#[utoipa::path(
    get,
    path = "/api/reviews/user/{username}",
    tag = "reviews",
    params(
        ("username" = String, Path, description = "Owning username"),
        PageParams,
    ),
    responses(
        (status = 200, description = "One page of detailed reviews"),
        (status = 401, description = "Missing or invalid token", body = crate::error::ApiError),
        (status = 404, description = "Unknown username", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_by_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.to_request()?;
    let response = state.reviews.list_by_username(&username, page).await?;

    Ok(Json(response))
}

/// Get a single review
#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "The review", body = crate::reviews::ReviewSummary),
        (status = 404, description = "No review with this id", body = crate::error::ApiError),
    )
)]
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let review = state.reviews.get_by_id(id).await?;

    Ok(Json(review))
}

/// Create a review owned by the caller
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    request_body = ReviewInput,
    responses(
        (status = 200, description = "The stored review", body = crate::reviews::ReviewSummary),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 401, description = "Missing or invalid token", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<ReviewInput>,
) -> Result<impl IntoResponse, AppError> {
    let review = state.reviews.create(&user, input).await?;

    Ok(Json(review))
}

/// Partially update a review the caller owns
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    request_body = ReviewPatch,
    responses(
        (status = 200, description = "The updated review", body = crate::reviews::ReviewSummary),
        (status = 401, description = "Missing or invalid token", body = crate::error::ApiError),
        (status = 403, description = "Caller does not own the review", body = crate::error::ApiError),
        (status = 404, description = "No review with this id", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReviewPatch>,
) -> Result<impl IntoResponse, AppError> {
    let review = state.reviews.update(&user, id, patch).await?;

    Ok(Json(review))
}

/// Delete a review the caller owns
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = DeleteReviewResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ApiError),
        (status = 403, description = "Caller does not own the review", body = crate::error::ApiError),
        (status = 404, description = "No review with this id", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.reviews.delete(&user, id).await?;

    Ok(Json(DeleteReviewResponse {
        message: format!("Review {id} deleted"),
    }))
}
