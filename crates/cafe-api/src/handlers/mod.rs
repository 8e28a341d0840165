//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod favorites;
pub mod health;
pub mod lists;
pub mod profile;
pub mod reviews;

use crate::response::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
