//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Review not found: {0}")]
    ReviewNotFound(Snowflake),

    #[error("List not found: {0}")]
    ListNotFound(Snowflake),

    #[error("Place {0} is not in favorites")]
    FavoriteNotFound(String),

    #[error("Place {0} is not in this list")]
    ListItemNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid nickname: {0}")]
    InvalidNickname(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("No data to update")]
    NothingToUpdate,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the author can delete this review")]
    NotReviewAuthor,

    #[error("Only the owner can modify this list")]
    NotListOwner,

    #[error("This list is private")]
    PrivateList,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Nickname already taken")]
    NicknameTaken,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Place is already in favorites")]
    AlreadyFavorited,

    #[error("Place is already in this list")]
    PlaceAlreadyInList,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::ListNotFound(_) => "UNKNOWN_LIST",
            Self::FavoriteNotFound(_) => "UNKNOWN_FAVORITE",
            Self::ListItemNotFound(_) => "UNKNOWN_LIST_ITEM",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidNickname(_) => "INVALID_NICKNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::NothingToUpdate => "NOTHING_TO_UPDATE",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Authorization
            Self::NotReviewAuthor => "NOT_REVIEW_AUTHOR",
            Self::NotListOwner => "NOT_LIST_OWNER",
            Self::PrivateList => "PRIVATE_LIST",

            // Conflict
            Self::NicknameTaken => "NICKNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::PlaceAlreadyInList => "PLACE_ALREADY_IN_LIST",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::ListNotFound(_)
                | Self::FavoriteNotFound(_)
                | Self::ListItemNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidNickname(_)
                | Self::WeakPassword(_)
                | Self::InvalidRating(_)
                | Self::NothingToUpdate
                | Self::UnsupportedFileType(_)
                | Self::FileTooLarge { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotReviewAuthor | Self::NotListOwner | Self::PrivateList
        )
    }

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::NicknameTaken | Self::EmailTaken | Self::AlreadyFavorited | Self::PlaceAlreadyInList
        )
    }
}
