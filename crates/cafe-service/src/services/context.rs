//! Service context - dependency container for services
//!
//! Holds the repositories, the session and avatar stores, the JWT service and
//! the ID generator. Everything storage-facing is a trait object so the same
//! services run against MySQL/Redis in production and in-memory doubles in
//! tests.

use std::sync::Arc;

use cafe_common::JwtService;
use cafe_core::traits::{
    AvatarStore, FavoriteRepository, ListRepository, ReviewRepository, SessionStore,
    UserRepository,
};
use cafe_core::value_objects::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Default avatar size limit (5 MB)
pub const DEFAULT_MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    list_repo: Arc<dyn ListRepository>,

    // Stores
    session_store: Arc<dyn SessionStore>,
    avatar_store: Arc<dyn AvatarStore>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    max_avatar_bytes: usize,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn list_repo(&self) -> &dyn ListRepository {
        self.list_repo.as_ref()
    }

    // === Stores ===

    /// Refresh session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    pub fn avatar_store(&self) -> &dyn AvatarStore {
        self.avatar_store.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Largest accepted avatar upload in bytes
    pub fn max_avatar_bytes(&self) -> usize {
        self.max_avatar_bytes
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("stores", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("max_avatar_bytes", &self.max_avatar_bytes)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    list_repo: Option<Arc<dyn ListRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    avatar_store: Option<Arc<dyn AvatarStore>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    max_avatar_bytes: Option<usize>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn list_repo(mut self, repo: Arc<dyn ListRepository>) -> Self {
        self.list_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn avatar_store(mut self, store: Arc<dyn AvatarStore>) -> Self {
        self.avatar_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn max_avatar_bytes(mut self, bytes: usize) -> Self {
        self.max_avatar_bytes = Some(bytes);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            favorite_repo: required(self.favorite_repo, "favorite_repo")?,
            review_repo: required(self.review_repo, "review_repo")?,
            list_repo: required(self.list_repo, "list_repo")?,
            session_store: required(self.session_store, "session_store")?,
            avatar_store: required(self.avatar_store, "avatar_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            max_avatar_bytes: self.max_avatar_bytes.unwrap_or(DEFAULT_MAX_AVATAR_BYTES),
        })
    }
}
