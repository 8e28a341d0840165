//! Favorite service

use cafe_core::entities::Favorite;
use cafe_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{
    AddFavoriteRequest, FavoriteCreatedResponse, FavoriteResponse, FavoriteStatusResponse,
    FavoritesResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Favorite service
pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The user's favorites, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<FavoritesResponse> {
        let favorites = self.ctx.favorite_repo().find_by_user(user_id).await?;
        Ok(FavoritesResponse {
            favorites: favorites.into_iter().map(FavoriteResponse::from).collect(),
        })
    }

    #[instrument(skip(self, request), fields(place_id = %request.place_id))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        request: AddFavoriteRequest,
    ) -> ServiceResult<FavoriteCreatedResponse> {
        let mut favorite = Favorite::new(user_id, request.place_id, request.place_name)
            .with_photo(request.place_photo);
        favorite.place_rating = request.place_rating;
        favorite.place_vicinity = request.place_vicinity;
        favorite.location = request.geometry.map(|g| g.location);

        self.ctx.favorite_repo().create(&favorite).await?;

        info!(user_id = %user_id, "Place added to favorites");

        Ok(FavoriteCreatedResponse {
            message: "Added to favorites".to_string(),
            favorite: FavoriteResponse::from(favorite),
        })
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Snowflake, place_id: &str) -> ServiceResult<()> {
        self.ctx.favorite_repo().delete(user_id, place_id).await?;
        info!(user_id = %user_id, "Place removed from favorites");
        Ok(())
    }

    pub async fn check(
        &self,
        user_id: Snowflake,
        place_id: &str,
    ) -> ServiceResult<FavoriteStatusResponse> {
        let is_favorite = self.ctx.favorite_repo().exists(user_id, place_id).await?;
        Ok(FavoriteStatusResponse { is_favorite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Geometry;
    use crate::services::ServiceError;
    use crate::testing::TestHarness;
    use cafe_core::{DomainError, GeoPoint};

    fn request(place_id: &str) -> AddFavoriteRequest {
        AddFavoriteRequest {
            place_id: place_id.to_string(),
            place_name: "Lviv Croissants".to_string(),
            place_photo: Some("data:image/png;base64,AAAA".to_string()),
            place_rating: Some(4.6),
            place_vicinity: Some("Rynok Square 1".to_string()),
            geometry: Some(Geometry {
                location: GeoPoint::new(49.8419, 24.0315),
            }),
        }
    }

    #[tokio::test]
    async fn test_add_check_remove() {
        let h = TestHarness::new();
        let user = h.user("olena").await;
        let favorites = FavoriteService::new(&h.ctx);

        let created = favorites.add(user.id, request("place-1")).await.unwrap();
        assert_eq!(created.favorite.id, "place-1");
        // Inline images are not stored
        assert_eq!(created.favorite.photo, None);
        assert_eq!(
            created.favorite.geometry.map(|g| g.location),
            Some(GeoPoint::new(49.8419, 24.0315))
        );

        assert!(favorites.check(user.id, "place-1").await.unwrap().is_favorite);
        assert_eq!(favorites.list(user.id).await.unwrap().favorites.len(), 1);

        favorites.remove(user.id, "place-1").await.unwrap();
        assert!(!favorites.check(user.id, "place-1").await.unwrap().is_favorite);

        let err = favorites.remove(user.id, "place-1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::FavoriteNotFound(_))));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_duplicate_favorite_is_rejected() {
        let h = TestHarness::new();
        let user = h.user("olena").await;
        let favorites = FavoriteService::new(&h.ctx);

        favorites.add(user.id, request("place-1")).await.unwrap();
        let err = favorites.add(user.id, request("place-1")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::AlreadyFavorited)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let h = TestHarness::new();
        let olena = h.user("olena").await;
        let taras = h.user("taras").await;
        let favorites = FavoriteService::new(&h.ctx);

        favorites.add(olena.id, request("place-1")).await.unwrap();
        favorites.add(taras.id, request("place-1")).await.unwrap();
        assert_eq!(favorites.list(taras.id).await.unwrap().favorites.len(), 1);
    }
}
