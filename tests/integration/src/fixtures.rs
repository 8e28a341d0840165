//! Test fixtures and data generators
//!
//! Provides reusable request bodies for integration tests. Identifiers are
//! random so repeated runs against the same database never collide.

use cafe_core::GeoPoint;
use cafe_service::dto::{
    AddFavoriteRequest, AddListItemRequest, CreateListRequest, Geometry, RegisterRequest,
    SaveReviewRequest,
};

/// Password accepted by the strength rules
pub const TEST_PASSWORD: &str = "coffee123";

/// Short random token, valid inside nicknames and place IDs
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn register_request() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        name: "Test".to_string(),
        surname: Some("User".to_string()),
        nickname: format!("user_{suffix}"),
        email: format!("user_{suffix}@example.com"),
        password: TEST_PASSWORD.to_string(),
    }
}

pub fn unique_place_id() -> String {
    format!("place_{}", unique_suffix())
}

pub fn favorite_request(place_id: &str) -> AddFavoriteRequest {
    AddFavoriteRequest {
        place_id: place_id.to_string(),
        place_name: "Lviv Coffee Manufacture".to_string(),
        place_photo: Some("https://images.example.com/kava.jpg".to_string()),
        place_rating: Some(4.7),
        place_vicinity: Some("Rynok Square 10".to_string()),
        geometry: Some(Geometry {
            location: GeoPoint::FALLBACK,
        }),
    }
}

pub fn review_request(place_id: &str, rating: i64, comment: &str) -> SaveReviewRequest {
    SaveReviewRequest {
        place_id: place_id.to_string(),
        place_name: Some("Lviv Coffee Manufacture".to_string()),
        rating,
        comment: Some(comment.to_string()),
    }
}

pub fn list_request(name: &str, is_public: bool) -> CreateListRequest {
    CreateListRequest {
        name: name.to_string(),
        description: Some("Places worth a visit".to_string()),
        is_public: Some(is_public),
    }
}

pub fn list_item_request(place_id: &str) -> AddListItemRequest {
    AddListItemRequest {
        place_id: place_id.to_string(),
        place_name: Some("Svit Kavy".to_string()),
        place_photo: None,
        place_rating: Some(4.5),
        place_vicinity: Some("Katedralna Square 6".to_string()),
    }
}

/// Smallest valid PNG (1x1, transparent)
pub fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}
