//! Favorite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_favorites table
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteModel {
    pub user_id: i64,
    pub place_id: String,
    pub place_name: String,
    pub place_photo: Option<String>,
    pub place_rating: Option<f64>,
    pub place_vicinity: Option<String>,
    pub place_lat: Option<f64>,
    pub place_lng: Option<f64>,
    pub added_at: DateTime<Utc>,
}
