//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use cafe_cache::{RedisPool, RefreshTokenStore};
use cafe_common::{AppConfig, AppError, JwtService};
use cafe_core::entities::UPLOADS_PREFIX;
use cafe_core::SnowflakeGenerator;
use cafe_db::{
    create_pool, run_migrations, MySqlFavoriteRepository, MySqlListRepository, MySqlPool,
    MySqlReviewRepository, MySqlUserRepository, MIGRATIONS_DIR,
};
use cafe_service::{DiskAvatarStore, ServiceContext};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::handlers;
use crate::middleware::{apply_middleware, apply_rate_limit, MiddlewareConfig};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_rate_limit(
        create_router(config.storage.max_avatar_bytes()),
        &config.rate_limit,
    );

    let router = api
        .merge(health_routes())
        .nest_service(UPLOADS_PREFIX, ServeDir::new(&config.storage.upload_dir))
        .fallback(handlers::not_found);

    let router = apply_middleware(
        router,
        &MiddlewareConfig {
            cors: &config.cors,
            request_timeout: Duration::from_secs(config.api.request_timeout_secs),
            is_production: config.app.env.is_production(),
        },
    );

    router.with_state(state)
}

/// Wire repositories and stores around existing pools
pub fn build_app_state(
    config: AppConfig,
    pool: MySqlPool,
    redis_pool: RedisPool,
) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context = ServiceContext::builder()
        .user_repo(Arc::new(MySqlUserRepository::new(pool.clone())))
        .favorite_repo(Arc::new(MySqlFavoriteRepository::new(pool.clone())))
        .review_repo(Arc::new(MySqlReviewRepository::new(pool.clone())))
        .list_repo(Arc::new(MySqlListRepository::new(pool.clone())))
        .session_store(Arc::new(RefreshTokenStore::new(redis_pool.clone())))
        .avatar_store(Arc::new(DiskAvatarStore::new(&config.storage.upload_dir)))
        .jwt_service(jwt_service)
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .max_avatar_bytes(config.storage.max_avatar_bytes())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, redis_pool))
}

/// Connect to MySQL and Redis, apply migrations if configured, and build the state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to MySQL...");
    let pool = create_pool(&cafe_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("MySQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, MIGRATIONS_DIR.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    if let Err(e) = redis_pool.health_check().await {
        warn!(error = %e, "Redis is not reachable yet");
    }

    DiskAvatarStore::new(&config.storage.upload_dir)
        .ensure_root()
        .await
        .map_err(|e| AppError::Config(format!("upload directory: {e}")))?;

    build_app_state(config, pool, redis_pool)
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app(state), &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
