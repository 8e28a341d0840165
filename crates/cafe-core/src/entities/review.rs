//! Review entity - one rating per user and place, plus likes

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A user's review of a place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub place_id: String,
    pub place_name: Option<String>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a review, validating the rating range
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        place_id: String,
        rating: i64,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id,
            user_id,
            place_id,
            place_name: None,
            rating: Self::validate_rating(rating)?,
            comment: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_rating(rating: i64) -> Result<u8, DomainError> {
        u8::try_from(rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or(DomainError::InvalidRating(rating))
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// Public view of a review's author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAuthor {
    pub id: Snowflake,
    pub name: String,
    pub avatar_path: Option<String>,
}

/// Review joined with its author and like statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author: ReviewAuthor,
    pub likes_count: i64,
    /// Whether the viewing user liked it; false for anonymous viewers
    pub is_liked: bool,
}

/// Result of an upsert keyed on (user, place)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpsert {
    pub review: Review,
    pub created: bool,
}

/// State of a like after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: i64,
}

/// Filters for review listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub place_id: Option<String>,
    pub user_id: Option<Snowflake>,
    /// Caller, used to compute `is_liked`
    pub viewer: Option<Snowflake>,
}
