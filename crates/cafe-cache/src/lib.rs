//! # cafe-cache
//!
//! Redis layer for refresh-token sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Refresh sessions with expiry and per-user revocation
//!
//! ## Example
//!
//! ```ignore
//! use cafe_cache::{RedisPool, RedisPoolConfig, RefreshTokenStore};
//! use cafe_core::traits::SessionStore;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RefreshTokenStore::new(pool);
//!
//! sessions.store(&session_id, user_id, 7 * 24 * 3600).await?;
//! assert!(sessions.validate(&session_id, user_id).await?);
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};
