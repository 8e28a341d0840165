//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod favorite;
pub mod list;
pub mod profile;
pub mod review;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use list::ListService;
pub use profile::ProfileService;
pub use review::{ReviewService, SavedReview};
