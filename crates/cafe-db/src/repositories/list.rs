//! MySQL implementation of ListRepository

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::instrument;

use cafe_core::entities::{CafeList, ListPlace};
use cafe_core::error::DomainError;
use cafe_core::traits::{ListRepository, RepoResult};
use cafe_core::value_objects::Snowflake;

use crate::models::{ListModel, ListPlaceModel};

use super::error::{map_db_error, map_unique_violation};

const LIST_COLUMNS: &str = "id, user_id, name, description, is_public, created_at, updated_at";

/// MySQL implementation of ListRepository
#[derive(Clone)]
pub struct MySqlListRepository {
    pool: MySqlPool,
}

impl MySqlListRepository {
    /// Create a new MySqlListRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListRepository for MySqlListRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CafeList>> {
        let result = sqlx::query_as::<_, ListModel>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CafeList::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake, public_only: bool) -> RepoResult<Vec<CafeList>> {
        let rows = sqlx::query_as::<_, ListModel>(&format!(
            r"SELECT {LIST_COLUMNS} FROM lists
            WHERE user_id = ? AND (? = FALSE OR is_public = TRUE)
            ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.into_inner())
        .bind(public_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CafeList::from).collect())
    }

    #[instrument(skip(self, list), fields(list_id = %list.id))]
    async fn create(&self, list: &CafeList) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO lists (id, user_id, name, description, is_public, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(list.id.into_inner())
        .bind(list.user_id.into_inner())
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.is_public)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, list), fields(list_id = %list.id))]
    async fn update(&self, list: &CafeList) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE lists
            SET name = ?, description = ?, is_public = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.is_public)
        .bind(list.updated_at)
        .bind(list.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ListNotFound(list.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // list_places rows go with the list (ON DELETE CASCADE)
        let result = sqlx::query(
            r"
            DELETE FROM lists WHERE id = ?
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ListNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_items(&self, list_id: Snowflake) -> RepoResult<Vec<ListPlace>> {
        let rows = sqlx::query_as::<_, ListPlaceModel>(
            r"
            SELECT id, list_id, place_id, place_name, place_photo, place_rating, place_vicinity, added_at
            FROM list_places
            WHERE list_id = ?
            ORDER BY added_at DESC, id DESC
            ",
        )
        .bind(list_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ListPlace::from).collect())
    }

    #[instrument(skip(self, item), fields(list_id = %item.list_id, place_id = %item.place_id))]
    async fn add_item(&self, item: &ListPlace) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO list_places
                (id, list_id, place_id, place_name, place_photo, place_rating, place_vicinity, added_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(item.id.into_inner())
        .bind(item.list_id.into_inner())
        .bind(&item.place_id)
        .bind(&item.place_name)
        .bind(&item.place_photo)
        .bind(item.place_rating)
        .bind(&item.place_vicinity)
        .bind(item.added_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::PlaceAlreadyInList))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, list_id: Snowflake, place_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM list_places WHERE list_id = ? AND place_id = ?
            ",
        )
        .bind(list_id.into_inner())
        .bind(place_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ListItemNotFound(place_id.to_string()));
        }

        Ok(())
    }
}
