//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddFavoriteRequest, AddListItemRequest, CheckNicknameQuery, CreateListRequest, Geometry,
    LoginRequest, RefreshTokenRequest, RegisterRequest, ReviewSearchQuery, SaveReviewRequest,
    UpdateListRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, AvatarResponse, FavoriteCreatedResponse, FavoriteResponse,
    FavoriteStatusResponse, FavoritesResponse, HealthChecks, HealthResponse, LikeResponse,
    ListDetailResponse, ListEnvelope, ListItemEnvelope, ListItemResponse, ListResponse,
    ListsResponse, MessageResponse, NicknameAvailabilityResponse, ProfileResponse,
    ReadinessResponse, ReviewAuthorResponse, ReviewEnvelope, ReviewResponse, ReviewsResponse,
    UserResponse,
};
