//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Writes guarded by a uniqueness rule report
//! the matching conflict variant of [`DomainError`] rather than a raw
//! database error.

use async_trait::async_trait;

use crate::entities::{
    CafeList, Favorite, LikeToggle, ListPlace, Review, ReviewQuery, ReviewUpsert,
    ReviewWithAuthor, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email or nickname
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// Get the stored password hash
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Check if a nickname is taken, optionally ignoring one user
    async fn nickname_exists(&self, nickname: &str, exclude: Option<Snowflake>) -> RepoResult<bool>;

    /// Check if an email is taken, optionally ignoring one user
    async fn email_exists(&self, email: &str, exclude: Option<Snowflake>) -> RepoResult<bool>;

    /// Create a user
    ///
    /// Nickname is checked before email; fails with `NicknameTaken` or
    /// `EmailTaken`.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Persist profile fields (name, surname, nickname, email)
    ///
    /// Same uniqueness rules as `create`, excluding the user itself.
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Set or clear the avatar file name
    async fn update_avatar(&self, id: Snowflake, avatar_path: Option<&str>) -> RepoResult<()>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// List a user's favorites, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>>;

    /// Check if the place is among the user's favorites
    async fn exists(&self, user_id: Snowflake, place_id: &str) -> RepoResult<bool>;

    /// Add a favorite; fails with `AlreadyFavorited` on a repeated pair
    async fn create(&self, favorite: &Favorite) -> RepoResult<()>;

    /// Remove a favorite; fails with `FavoriteNotFound` when absent
    async fn delete(&self, user_id: Snowflake, place_id: &str) -> RepoResult<()>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>>;

    /// Find a review with author and like statistics
    async fn find_with_author(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ReviewWithAuthor>>;

    /// List reviews matching the query, newest first
    async fn search(&self, query: &ReviewQuery) -> RepoResult<Vec<ReviewWithAuthor>>;

    /// Insert or update the single review of (user, place)
    ///
    /// On update the existing ID and `created_at` are kept.
    async fn upsert(&self, review: &Review) -> RepoResult<ReviewUpsert>;

    /// Delete a review and its likes
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Like the review if the user has not, otherwise remove the like
    async fn toggle_like(&self, review_id: Snowflake, user_id: Snowflake) -> RepoResult<LikeToggle>;
}

// ============================================================================
// List Repository
// ============================================================================

#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Find list by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CafeList>>;

    /// Lists owned by a user, newest first
    async fn find_by_user(&self, user_id: Snowflake, public_only: bool) -> RepoResult<Vec<CafeList>>;

    /// Create a new list
    async fn create(&self, list: &CafeList) -> RepoResult<()>;

    /// Update name, description and visibility
    async fn update(&self, list: &CafeList) -> RepoResult<()>;

    /// Delete a list and its items
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Items of a list, newest first
    async fn find_items(&self, list_id: Snowflake) -> RepoResult<Vec<ListPlace>>;

    /// Add an item; fails with `PlaceAlreadyInList` on a repeated place
    async fn add_item(&self, item: &ListPlace) -> RepoResult<()>;

    /// Remove an item; fails with `ListItemNotFound` when absent
    async fn remove_item(&self, list_id: Snowflake, place_id: &str) -> RepoResult<()>;
}
