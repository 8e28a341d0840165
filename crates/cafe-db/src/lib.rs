//! # cafe-db
//!
//! Database layer implementing repository traits with MySQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides MySQL implementations for all repository traits
//! defined in `cafe-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cafe_db::pool::{create_pool, run_migrations, DatabaseConfig, MIGRATIONS_DIR};
//! use cafe_db::repositories::MySqlUserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, MIGRATIONS_DIR.as_ref()).await?;
//!     let user_repo = MySqlUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_lazy_pool, create_pool, run_migrations, DatabaseConfig, MySqlPool, MIGRATIONS_DIR,
};
pub use repositories::{
    MySqlFavoriteRepository, MySqlListRepository, MySqlReviewRepository, MySqlUserRepository,
};
