//! Favorite handlers

use axum::{
    extract::{Path, State},
    Json,
};
use cafe_service::dto::{
    AddFavoriteRequest, FavoriteCreatedResponse, FavoriteStatusResponse, FavoritesResponse,
    MessageResponse,
};
use cafe_service::FavoriteService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FavoritesResponse>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Json(service.list(auth.user_id).await?))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddFavoriteRequest>,
) -> ApiResult<Created<Json<FavoriteCreatedResponse>>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Created(Json(service.add(auth.user_id, request).await?)))
}

/// DELETE /api/favorites/:place_id
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(place_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = FavoriteService::new(state.service_context());
    service.remove(auth.user_id, &place_id).await?;
    Ok(Json(MessageResponse::new("Removed from favorites")))
}

/// GET /api/favorites/check/:place_id
pub async fn check_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(place_id): Path<String>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Json(service.check(auth.user_id, &place_id).await?))
}
