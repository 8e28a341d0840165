//! # cafe-core
//!
//! Domain layer containing entities, value objects, repository traits and
//! the place ranking pipeline.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod ranking;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CafeList, Favorite, LikeToggle, ListChanges, ListPlace, Place, ProfileChanges, Review,
    ReviewAuthor, ReviewQuery, ReviewUpsert, ReviewWithAuthor, User,
};
pub use error::DomainError;
pub use ranking::{FilterSettings, PurposePreset, RankedPlace, SortMode};
pub use traits::{
    AvatarStore, FavoriteRepository, ListRepository, RepoResult, ReviewRepository, SessionStore,
    UserRepository,
};
pub use value_objects::{GeoPoint, Snowflake, SnowflakeGenerator, SnowflakeParseError};
