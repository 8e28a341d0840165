//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, and the pools probed by the readiness check.

use std::sync::Arc;

use cafe_cache::RedisPool;
use cafe_common::{AppConfig, JwtService};
use cafe_db::MySqlPool;
use cafe_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    db_pool: MySqlPool,
    redis_pool: RedisPool,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        db_pool: MySqlPool,
        redis_pool: RedisPool,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            db_pool,
            redis_pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db_pool(&self) -> &MySqlPool {
        &self.db_pool
    }

    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .field("redis_pool", &self.redis_pool)
            .finish_non_exhaustive()
    }
}
