//! MySQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::instrument;

use cafe_core::entities::Favorite;
use cafe_core::error::DomainError;
use cafe_core::traits::{FavoriteRepository, RepoResult};
use cafe_core::value_objects::Snowflake;

use crate::models::FavoriteModel;

use super::error::{map_db_error, map_unique_violation};

/// MySQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct MySqlFavoriteRepository {
    pool: MySqlPool,
}

impl MySqlFavoriteRepository {
    /// Create a new MySqlFavoriteRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for MySqlFavoriteRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, FavoriteModel>(
            r"
            SELECT user_id, place_id, place_name, place_photo, place_rating, place_vicinity,
                   place_lat, place_lng, added_at
            FROM user_favorites
            WHERE user_id = ?
            ORDER BY added_at DESC, place_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, place_id: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT CAST(EXISTS(
                SELECT 1 FROM user_favorites WHERE user_id = ? AND place_id = ?
            ) AS SIGNED)
            ",
        )
        .bind(user_id.into_inner())
        .bind(place_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result != 0)
    }

    #[instrument(skip(self, favorite), fields(user_id = %favorite.user_id, place_id = %favorite.place_id))]
    async fn create(&self, favorite: &Favorite) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_favorites
                (user_id, place_id, place_name, place_photo, place_rating, place_vicinity,
                 place_lat, place_lng, added_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(favorite.user_id.into_inner())
        .bind(&favorite.place_id)
        .bind(&favorite.place_name)
        .bind(&favorite.place_photo)
        .bind(favorite.place_rating)
        .bind(&favorite.place_vicinity)
        .bind(favorite.location.map(|l| l.lat))
        .bind(favorite.location.map(|l| l.lng))
        .bind(favorite.added_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::AlreadyFavorited))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, place_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM user_favorites WHERE user_id = ? AND place_id = ?
            ",
        )
        .bind(user_id.into_inner())
        .bind(place_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FavoriteNotFound(place_id.to_string()));
        }

        Ok(())
    }
}
