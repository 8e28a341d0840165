//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use cafe_core::entities::{
    avatar_url_for, CafeList, Favorite, LikeToggle, ListPlace, ReviewWithAuthor, User,
};

use super::requests::Geometry;
use super::responses::{
    FavoriteResponse, LikeResponse, ListItemResponse, ListResponse, ReviewAuthorResponse,
    ReviewResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Favorite Mappers
// ============================================================================

impl From<&Favorite> for FavoriteResponse {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.place_id.clone(),
            place_id: favorite.place_id.clone(),
            name: favorite.place_name.clone(),
            rating: favorite.place_rating,
            vicinity: favorite.place_vicinity.clone(),
            photo: favorite.place_photo.clone(),
            geometry: favorite.location.map(|location| Geometry { location }),
            added_at: favorite.added_at,
        }
    }
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self::from(&favorite)
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<ReviewWithAuthor> for ReviewResponse {
    fn from(row: ReviewWithAuthor) -> Self {
        let review = row.review;
        Self {
            id: review.id,
            user_id: review.user_id,
            place_id: review.place_id,
            place_name: review.place_name,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
            likes_count: row.likes_count,
            is_liked: row.is_liked,
            user: ReviewAuthorResponse {
                id: row.author.id,
                name: row.author.name,
                avatar_url: row.author.avatar_path.as_deref().and_then(avatar_url_for),
            },
        }
    }
}

impl From<LikeToggle> for LikeResponse {
    fn from(toggle: LikeToggle) -> Self {
        Self {
            liked: toggle.liked,
            likes_count: toggle.likes_count,
        }
    }
}

// ============================================================================
// List Mappers
// ============================================================================

impl From<&CafeList> for ListResponse {
    fn from(list: &CafeList) -> Self {
        Self {
            id: list.id,
            user_id: list.user_id,
            name: list.name.clone(),
            description: list.description.clone(),
            is_public: list.is_public,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

impl From<CafeList> for ListResponse {
    fn from(list: CafeList) -> Self {
        Self::from(&list)
    }
}

impl From<ListPlace> for ListItemResponse {
    fn from(item: ListPlace) -> Self {
        Self {
            id: item.id,
            list_id: item.list_id,
            place_id: item.place_id,
            place_name: item.place_name,
            place_photo: item.place_photo,
            place_rating: item.place_rating,
            place_vicinity: item.place_vicinity,
            added_at: item.added_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::entities::{Review, ReviewAuthor};
    use cafe_core::value_objects::{GeoPoint, Snowflake};

    #[test]
    fn test_favorite_without_location_has_null_geometry() {
        let favorite = Favorite::new(Snowflake::new(1), "p1".into(), "Kava".into());
        let response = FavoriteResponse::from(&favorite);
        assert_eq!(response.id, "p1");
        assert!(response.geometry.is_none());

        let mut located = favorite;
        located.location = Some(GeoPoint::new(49.8, 24.0));
        assert!(FavoriteResponse::from(located).geometry.is_some());
    }

    #[test]
    fn test_review_author_avatar_becomes_url() {
        let review = Review::new(Snowflake::new(9), Snowflake::new(1), "p1".into(), 5).unwrap();
        let response = ReviewResponse::from(ReviewWithAuthor {
            review,
            author: ReviewAuthor {
                id: Snowflake::new(1),
                name: "Olena".into(),
                avatar_path: Some("uploads/avatar-1.png".into()),
            },
            likes_count: 3,
            is_liked: true,
        });

        assert_eq!(response.user.avatar_url.as_deref(), Some("/uploads/avatar-1.png"));
        assert_eq!(response.likes_count, 3);
        assert!(response.is_liked);
    }
}
