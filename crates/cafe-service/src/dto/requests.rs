//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Rules that belong to the domain (nickname charset, password strength,
//! rating range) are enforced again by the services.

use cafe_core::value_objects::GeoPoint;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Surname must be at most 100 characters"))]
    pub surname: Option<String>,

    #[validate(length(min = 3, max = 32, message = "Nickname must be 3-32 characters"))]
    pub nickname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
}

/// Login with email or nickname
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "nickname")]
    #[validate(length(min = 1, message = "Email or nickname is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// Empty string clears the surname
    #[validate(length(max = 100, message = "Surname must be at most 100 characters"))]
    pub surname: Option<String>,

    #[validate(length(min = 3, max = 32, message = "Nickname must be 3-32 characters"))]
    pub nickname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// `?nickname=` query of the availability check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckNicknameQuery {
    pub nickname: Option<String>,
}

// ============================================================================
// Favorite Requests
// ============================================================================

/// Place geometry as sent by the map provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

/// Add a place to favorites
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[validate(length(min = 1, max = 255, message = "place_id is required"))]
    pub place_id: String,

    #[validate(length(min = 1, max = 255, message = "place_name is required"))]
    pub place_name: String,

    /// Inline `data:` URLs and very long URLs are dropped
    pub place_photo: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub place_rating: Option<f64>,

    #[validate(length(max = 500, message = "Vicinity must be at most 500 characters"))]
    pub place_vicinity: Option<String>,

    pub geometry: Option<Geometry>,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Create or replace the caller's review of a place
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveReviewRequest {
    #[validate(length(min = 1, max = 255, message = "place_id is required"))]
    pub place_id: String,

    #[validate(length(max = 255, message = "Place name must be at most 255 characters"))]
    pub place_name: Option<String>,

    /// 1-5, checked by the domain
    pub rating: i64,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

/// `?place_id=&user_id=` filters of the review listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSearchQuery {
    pub place_id: Option<String>,
    pub user_id: Option<String>,
}

// ============================================================================
// List Requests
// ============================================================================

/// Create a curated list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(max = 100, message = "List name must be at most 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub is_public: Option<bool>,
}

/// Partial list update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateListRequest {
    #[validate(length(max = 100, message = "List name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub is_public: Option<bool>,
}

/// Add a place to a list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddListItemRequest {
    #[validate(length(min = 1, max = 255, message = "place_id is required"))]
    pub place_id: String,

    #[validate(length(max = 255, message = "Place name must be at most 255 characters"))]
    pub place_name: Option<String>,

    pub place_photo: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub place_rating: Option<f64>,

    #[validate(length(max = 500, message = "Vicinity must be at most 500 characters"))]
    pub place_vicinity: Option<String>,
}
