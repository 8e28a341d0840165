//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Responses also deserialize so the typed client can share them.

use cafe_core::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::Geometry;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth & Profile Responses
// ============================================================================

/// The signed-in user's own profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub name: String,
    pub surname: Option<String>,
    pub nickname: String,
    pub email: String,
    /// `/uploads/<file>` or null
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Authentication response with tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Access token
    pub token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameAvailabilityResponse {
    pub available: bool,
}

// ============================================================================
// Favorite Responses
// ============================================================================

/// Favorite in the shape of a place card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    /// Same as `place_id`
    pub id: String,
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub photo: Option<String>,
    pub geometry: Option<Geometry>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteCreatedResponse {
    pub message: String,
    pub favorite: FavoriteResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatusResponse {
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

// ============================================================================
// Review Responses
// ============================================================================

/// Public view of a review author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthorResponse {
    pub id: Snowflake,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub place_id: String,
    pub place_name: Option<String>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    /// Always false for anonymous viewers
    pub is_liked: bool,
    pub user: ReviewAuthorResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEnvelope {
    pub review: ReviewResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
}

/// Like state after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
}

// ============================================================================
// List Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub list: ListResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsResponse {
    pub lists: Vec<ListResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemResponse {
    pub id: Snowflake,
    pub list_id: Snowflake,
    pub place_id: String,
    pub place_name: Option<String>,
    pub place_photo: Option<String>,
    pub place_rating: Option<f64>,
    pub place_vicinity: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemEnvelope {
    pub item: ListItemResponse,
}

/// A list with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetailResponse {
    pub list: ListResponse,
    pub items: Vec<ListItemResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let label = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                redis: label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
