//! Review handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use cafe_service::dto::{
    LikeResponse, MessageResponse, ReviewEnvelope, ReviewSearchQuery, ReviewsResponse,
    SaveReviewRequest,
};
use cafe_service::ReviewService;

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Create or update the caller's review
///
/// POST /api/reviews (201 when created, 200 when updated)
pub async fn save_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SaveReviewRequest>,
) -> ApiResult<(StatusCode, Json<ReviewEnvelope>)> {
    let service = ReviewService::new(state.service_context());
    let saved = service.save(auth.user_id, request).await?;
    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ReviewEnvelope { review: saved.review })))
}

/// GET /api/reviews/place/:place_id
pub async fn place_reviews(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(place_id): Path<String>,
) -> ApiResult<Json<ReviewsResponse>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.for_place(&place_id, auth.user_id()).await?))
}

/// GET /api/reviews?place_id=&user_id=
pub async fn search_reviews(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<ReviewSearchQuery>,
) -> ApiResult<Json<ReviewsResponse>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.search(query, auth.user_id()).await?))
}

/// DELETE /api/reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ReviewService::new(state.service_context());
    service.delete(auth.user_id, path.id()?).await?;
    Ok(Json(MessageResponse::new("Review deleted")))
}

/// POST /api/reviews/:id/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<LikeResponse>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.toggle_like(auth.user_id, path.id()?).await?))
}
