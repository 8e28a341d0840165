//! Authentication extractors
//!
//! Extracts and validates JWT access tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use cafe_common::AppError;
use cafe_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access token
///
/// A missing header is rejected with 401, an invalid or expired token with 403.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

impl AuthUser {
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        e
    })?;
    Ok(AuthUser::new(claims.user_id()?))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);
        authenticate(&app_state, bearer.token()).map_err(ApiError::from)
    }
}

/// Optional authenticated user
///
/// An absent or invalid token yields an anonymous caller.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(OptionalAuthUser(None));
        };

        let app_state = AppState::from_ref(state);
        Ok(OptionalAuthUser(authenticate(&app_state, bearer.token()).ok()))
    }
}
