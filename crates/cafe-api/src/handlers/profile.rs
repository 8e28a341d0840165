//! Profile handlers

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use cafe_core::DomainError;
use cafe_service::dto::{
    AvatarResponse, CheckNicknameQuery, NicknameAvailabilityResponse, ProfileResponse,
    UpdateProfileRequest,
};
use cafe_service::{AvatarUpload, ProfileService};

use crate::extractors::{AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the image
pub const AVATAR_FIELD: &str = "avatar";

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.get(auth.user_id).await?))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.update(auth.user_id, request).await?))
}

/// POST /api/profile/avatar (multipart field `avatar`)
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<AvatarResponse>> {
    let max_bytes = state.service_context().max_avatar_bytes();
    let too_large = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::Domain(DomainError::FileTooLarge { max_bytes })
        } else {
            ApiError::invalid_body(e.body_text())
        }
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(too_large)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(too_large)?;
        upload = Some(AvatarUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::invalid_body("No file uploaded"))?;

    let service = ProfileService::new(state.service_context());
    Ok(Json(service.upload_avatar(auth.user_id, upload).await?))
}

/// GET /api/check-nickname?nickname=
pub async fn check_nickname(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<CheckNicknameQuery>,
) -> ApiResult<Json<NicknameAvailabilityResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service
        .check_nickname(query.nickname.as_deref(), auth.user_id())
        .await?;
    Ok(Json(response))
}
