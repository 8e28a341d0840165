//! List handlers

use axum::{
    extract::{Path, State},
    Json,
};
use cafe_service::dto::{
    AddListItemRequest, CreateListRequest, ListDetailResponse, ListEnvelope, ListItemEnvelope,
    ListsResponse, MessageResponse, UpdateListRequest,
};
use cafe_service::ListService;

use crate::extractors::{
    AuthUser, IdPath, ListItemPath, OptionalAuthUser, UserIdPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/lists
pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateListRequest>,
) -> ApiResult<Created<Json<ListEnvelope>>> {
    let service = ListService::new(state.service_context());
    Ok(Created(Json(service.create(auth.user_id, request).await?)))
}

/// GET /api/lists
pub async fn my_lists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ListsResponse>> {
    let service = ListService::new(state.service_context());
    Ok(Json(service.mine(auth.user_id).await?))
}

/// GET /api/users/:user_id/lists
pub async fn user_lists(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ListsResponse>> {
    let service = ListService::new(state.service_context());
    Ok(Json(service.public_for_user(path.user_id()?).await?))
}

/// GET /api/lists/:id
pub async fn get_list(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<ListDetailResponse>> {
    let service = ListService::new(state.service_context());
    Ok(Json(service.get(path.id()?, auth.user_id()).await?))
}

/// PUT /api/lists/:id
pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateListRequest>,
) -> ApiResult<Json<ListEnvelope>> {
    let service = ListService::new(state.service_context());
    Ok(Json(service.update(auth.user_id, path.id()?, request).await?))
}

/// DELETE /api/lists/:id
pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ListService::new(state.service_context());
    service.delete(auth.user_id, path.id()?).await?;
    Ok(Json(MessageResponse::new("List deleted")))
}

/// POST /api/lists/:id/items
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<AddListItemRequest>,
) -> ApiResult<Created<Json<ListItemEnvelope>>> {
    let service = ListService::new(state.service_context());
    Ok(Created(Json(
        service.add_item(auth.user_id, path.id()?, request).await?,
    )))
}

/// DELETE /api/lists/:id/items/:place_id
pub async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListItemPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ListService::new(state.service_context());
    service
        .remove_item(auth.user_id, path.list_id()?, &path.place_id)
        .await?;
    Ok(Json(MessageResponse::new("Place removed from list")))
}
