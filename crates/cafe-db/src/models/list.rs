//! List database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the lists table
#[derive(Debug, Clone, FromRow)]
pub struct ListModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the list_places table
#[derive(Debug, Clone, FromRow)]
pub struct ListPlaceModel {
    pub id: i64,
    pub list_id: i64,
    pub place_id: String,
    pub place_name: Option<String>,
    pub place_photo: Option<String>,
    pub place_rating: Option<f64>,
    pub place_vicinity: Option<String>,
    pub added_at: DateTime<Utc>,
}
