//! Profile service
//!
//! Reads and edits the signed-in user's profile and avatar.

use cafe_core::entities::{ProfileChanges, User};
use cafe_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    AvatarResponse, NicknameAvailabilityResponse, ProfileResponse, UpdateProfileRequest,
    UserResponse,
};
use crate::storage::{avatar_extension, avatar_file_name, AvatarUpload};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the user's profile
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self.load(user_id).await?;
        Ok(ProfileResponse {
            user: UserResponse::from(user),
        })
    }

    /// Partially update name, surname, nickname and email
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let changes = ProfileChanges {
            name: request.name.as_deref().map(User::normalize_name).transpose()?,
            surname: request.surname.map(|s| s.trim().to_string()),
            nickname: request.nickname.map(|s| s.trim().to_string()),
            email: request.email.map(|s| s.trim().to_string()),
        };

        if let Some(nickname) = &changes.nickname {
            User::validate_nickname(nickname)?;
        }

        let mut user = self.load(user_id).await?;
        user.apply(&changes)?;

        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        Ok(ProfileResponse {
            user: UserResponse::from(user),
        })
    }

    /// Store a new avatar and delete the previous file
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    pub async fn upload_avatar(
        &self,
        user_id: Snowflake,
        upload: AvatarUpload,
    ) -> ServiceResult<AvatarResponse> {
        let max_bytes = self.ctx.max_avatar_bytes();
        if upload.bytes.len() > max_bytes {
            return Err(DomainError::FileTooLarge { max_bytes }.into());
        }
        if upload.bytes.is_empty() {
            return Err(ServiceError::validation("Avatar file is empty"));
        }

        let extension = avatar_extension(&upload.file_name, &upload.content_type)?;
        let mut user = self.load(user_id).await?;

        let file_name = avatar_file_name(user_id, &extension);
        self.ctx.avatar_store().save(&file_name, &upload.bytes).await?;

        if let Err(e) = self
            .ctx
            .user_repo()
            .update_avatar(user_id, Some(&file_name))
            .await
        {
            // Don't leave an orphan behind
            if let Err(cleanup) = self.ctx.avatar_store().remove(&file_name).await {
                warn!(error = %cleanup, file = %file_name, "Failed to remove orphaned avatar");
            }
            return Err(e.into());
        }

        if let Some(previous) = user.set_avatar(Some(file_name)) {
            if let Err(e) = self.ctx.avatar_store().remove(&previous).await {
                warn!(error = %e, file = %previous, "Failed to delete previous avatar");
            }
        }

        info!(user_id = %user_id, "Avatar updated");

        let avatar_url = user
            .avatar_url()
            .ok_or_else(|| ServiceError::internal("stored avatar has no file name"))?;
        Ok(AvatarResponse { avatar_url })
    }

    /// Whether a nickname is free, ignoring the viewer's own
    #[instrument(skip(self))]
    pub async fn check_nickname(
        &self,
        nickname: Option<&str>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<NicknameAvailabilityResponse> {
        let nickname = nickname
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ServiceError::validation("Nickname is required"))?;

        let taken = self.ctx.user_repo().nickname_exists(nickname, viewer).await?;
        Ok(NicknameAvailabilityResponse { available: !taken })
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
