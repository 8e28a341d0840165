//! Favorite entity - a place bookmarked by a user

use chrono::{DateTime, Utc};

use crate::value_objects::{GeoPoint, Snowflake};

/// Longest photo URL kept on a favorite or list item
pub const MAX_PHOTO_URL_LEN: usize = 4000;

/// A user's favorite place with denormalized display fields
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub user_id: Snowflake,
    pub place_id: String,
    pub place_name: String,
    pub place_photo: Option<String>,
    pub place_rating: Option<f64>,
    pub place_vicinity: Option<String>,
    pub location: Option<GeoPoint>,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Snowflake, place_id: String, place_name: String) -> Self {
        Self {
            user_id,
            place_id,
            place_name,
            place_photo: None,
            place_rating: None,
            place_vicinity: None,
            location: None,
            added_at: Utc::now(),
        }
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.place_photo = normalize_photo_url(photo);
        self
    }
}

/// Drop inline `data:` images and oversized URLs
pub fn normalize_photo_url(photo: Option<String>) -> Option<String> {
    photo.filter(|p| !p.is_empty() && !p.starts_with("data:") && p.len() <= MAX_PHOTO_URL_LEN)
}
