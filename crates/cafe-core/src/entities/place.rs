//! Place - an external search result, never persisted server side

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// A cafe as returned by the places provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Average rating on a 0-5 scale
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of ratings behind `rating`
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Place {
    pub fn new(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            vicinity: None,
            location: None,
            rating: None,
            user_ratings_total: None,
            open_now: None,
            photo_url: None,
        }
    }

    /// Rating or zero when the provider has none
    #[inline]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    #[inline]
    pub fn review_count(&self) -> u32 {
        self.user_ratings_total.unwrap_or(0)
    }

    /// Case-insensitive match against name and vicinity
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .vicinity
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matches_name_or_vicinity() {
        let mut place = Place::new("p1", "Lviv Croissants");
        place.vicinity = Some("Rynok Square 10".into());

        assert!(place.matches_keyword("croissant"));
        assert!(place.matches_keyword("RYNOK"));
        assert!(place.matches_keyword(""));
        assert!(!place.matches_keyword("pizza"));
    }

    #[test]
    fn test_deserialize_minimal_place() {
        let place: Place = serde_json::from_str(r#"{"place_id":"x","name":"Kava"}"#).unwrap();
        assert_eq!(place.rating_or_zero(), 0.0);
        assert_eq!(place.review_count(), 0);
        assert!(place.location.is_none());
    }
}
