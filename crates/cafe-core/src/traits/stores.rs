//! Non-relational storage ports: refresh sessions and avatar files

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::value_objects::Snowflake;

/// Server-side record of issued refresh tokens
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Remember a session for `ttl_secs`
    async fn store(&self, session_id: &str, user_id: Snowflake, ttl_secs: u64) -> RepoResult<()>;

    /// True when the session exists and belongs to `user_id`
    async fn validate(&self, session_id: &str, user_id: Snowflake) -> RepoResult<bool>;

    /// Forget a single session
    async fn revoke(&self, session_id: &str) -> RepoResult<()>;

    /// Forget every session of a user, returning how many were removed
    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64>;
}

/// Storage for uploaded avatar images
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Write the file under `file_name`
    async fn save(&self, file_name: &str, bytes: &[u8]) -> RepoResult<()>;

    /// Delete a file; a missing file is not an error
    async fn remove(&self, file_name: &str) -> RepoResult<()>;
}
