//! Review database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub user_id: i64,
    pub place_id: String,
    pub place_name: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review row joined with its author and like statistics
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthorModel {
    #[sqlx(flatten)]
    pub review: ReviewModel,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub likes_count: i64,
    /// 0 or 1
    pub is_liked: i64,
}
