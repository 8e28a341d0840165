//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use cafe_common::auth::{hash_password, validate_password_strength, verify_password};
use cafe_common::{AppError, IssuedTokens};
use cafe_core::entities::User;
use cafe_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(nickname = %request.nickname))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let name = User::normalize_name(&request.name)?;
        let nickname = request.nickname.trim().to_string();
        let email = request.email.trim().to_string();

        User::validate_nickname(&nickname)?;
        validate_password_strength(&request.password)?;

        // The repository re-checks both under lock on insert
        if self.ctx.user_repo().nickname_exists(&nickname, None).await? {
            return Err(ServiceError::from(DomainError::NicknameTaken));
        }
        if self.ctx.user_repo().email_exists(&email, None).await? {
            return Err(ServiceError::from(DomainError::EmailTaken));
        }

        let password_hash = hash_blocking(request.password).await?;

        let mut user = User::new(self.ctx.generate_id(), name, nickname, email);
        user.surname = request.surname.filter(|s| !s.trim().is_empty());

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.start_session(&user).await
    }

    /// Login with email or nickname and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let login = request.login.trim();

        let user = self
            .ctx
            .user_repo()
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_blocking(request.password, password_hash).await? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.start_session(&user).await
    }

    /// Exchange a refresh token for a new pair, revoking the old session
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let known = self
            .ctx
            .session_store()
            .validate(&claims.sid, user_id)
            .await?;
        if !known {
            warn!(user_id = %user_id, "Refresh rejected: session revoked or expired");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        self.ctx.session_store().revoke(&claims.sid).await?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.start_session(&user).await
    }

    /// Revoke every refresh session of the user
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        let revoked = self
            .ctx
            .session_store()
            .revoke_all_for_user(user_id)
            .await?;

        info!(user_id = %user_id, revoked, "User logged out successfully");
        Ok(())
    }

    /// Validate an access token and return the user ID
    pub fn authenticate(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    /// Issue a token pair and remember its refresh session
    async fn start_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let IssuedTokens { session_id, tokens } = self.ctx.jwt_service().issue(user.id)?;

        let ttl = u64::try_from(self.ctx.jwt_service().refresh_token_expiry()).unwrap_or(0);
        self.ctx
            .session_store()
            .store(&session_id, user.id, ttl)
            .await?;

        Ok(AuthResponse {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: UserResponse::from(user),
        })
    }
}

// Argon2 is CPU-bound; keep it off the async workers

async fn hash_blocking(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::internal(format!("hashing task failed: {e}")))?
        .map_err(ServiceError::from)
}

async fn verify_blocking(password: String, hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::internal(format!("verification task failed: {e}")))?
        .map_err(ServiceError::from)
}
