//! Refresh session storage in Redis.
//!
//! Each issued refresh token carries a session ID. The session lives under
//! `refresh_token:{session_id}` with the token's lifetime as TTL, and its ID
//! is tracked in `user_tokens:{user_id}` so a logout can revoke all of them.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use cafe_core::error::DomainError;
use cafe_core::traits::{RepoResult, SessionStore};
use cafe_core::value_objects::Snowflake;

use crate::pool::{RedisPool, RedisPoolError, RedisResult};

/// Key prefix for refresh sessions
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Key prefix for a user's session set
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Stored refresh session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    pub session_id: String,
    /// Creation time, Unix seconds
    pub created_at: i64,
}

impl RefreshTokenData {
    pub fn new(user_id: Snowflake, session_id: String) -> Self {
        Self {
            user_id,
            session_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Redis-backed [`SessionStore`]
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
}

impl RefreshTokenStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{session_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }

    async fn store_session(&self, data: &RefreshTokenData, ttl_secs: u64) -> RedisResult<()> {
        self.pool
            .set_json(&Self::key(&data.session_id), data, ttl_secs)
            .await?;

        // The set expires together with its newest session
        let user_key = Self::user_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, &data.session_id).await?;
        conn.expire::<_, ()>(&user_key, i64::try_from(ttl_secs).unwrap_or(i64::MAX))
            .await?;

        tracing::debug!(
            user_id = %data.user_id,
            session_id = %data.session_id,
            "Stored refresh session"
        );
        Ok(())
    }

    /// Session data, or `None` once expired or revoked
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_json(&Self::key(session_id)).await
    }

    async fn revoke_session(&self, session_id: &str) -> RedisResult<bool> {
        if let Some(data) = self.get(session_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), session_id)
                .await?;
        }

        let deleted = self.pool.delete_many(&[Self::key(session_id)]).await? > 0;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked refresh session");
        }
        Ok(deleted)
    }

    async fn revoke_user_sessions(&self, user_id: Snowflake) -> RedisResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn.smembers(&user_key).await?;
        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        let count = self.pool.delete_many(&keys).await?;

        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh sessions for user");
        Ok(count)
    }
}

fn cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

#[async_trait]
impl SessionStore for RefreshTokenStore {
    async fn store(&self, session_id: &str, user_id: Snowflake, ttl_secs: u64) -> RepoResult<()> {
        let data = RefreshTokenData::new(user_id, session_id.to_string());
        self.store_session(&data, ttl_secs).await.map_err(cache_error)
    }

    async fn validate(&self, session_id: &str, user_id: Snowflake) -> RepoResult<bool> {
        let data = self.get(session_id).await.map_err(cache_error)?;
        Ok(data.is_some_and(|d| d.user_id == user_id))
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        self.revoke_session(session_id)
            .await
            .map(|_| ())
            .map_err(cache_error)
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        self.revoke_user_sessions(user_id).await.map_err(cache_error)
    }
}
