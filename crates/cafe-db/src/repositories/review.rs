//! MySQL implementation of ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::instrument;

use cafe_core::entities::{LikeToggle, Review, ReviewQuery, ReviewUpsert, ReviewWithAuthor};
use cafe_core::error::DomainError;
use cafe_core::traits::{RepoResult, ReviewRepository};
use cafe_core::value_objects::Snowflake;

use crate::models::{ReviewModel, ReviewWithAuthorModel};

use super::error::{map_db_error, retry_on_deadlock, TxError};

const REVIEW_COLUMNS: &str =
    "id, user_id, place_id, place_name, rating, comment, created_at, updated_at";

// Review joined with author and like stats; the viewer is bound once
const REVIEW_WITH_AUTHOR_SELECT: &str = r"
    SELECT r.id, r.user_id, r.place_id, r.place_name, r.rating, r.comment,
           r.created_at, r.updated_at,
           u.name AS author_name, u.avatar_path AS author_avatar,
           (SELECT COUNT(*) FROM review_likes l WHERE l.review_id = r.id) AS likes_count,
           CAST(EXISTS(
               SELECT 1 FROM review_likes l WHERE l.review_id = r.id AND l.user_id = ?
           ) AS SIGNED) AS is_liked
    FROM reviews r
    JOIN users u ON u.id = r.user_id
";

/// MySQL implementation of ReviewRepository
#[derive(Clone)]
pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    /// Create a new MySqlReviewRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert or update the (user, place) review in one statement
    ///
    /// The unique key decides between insert and update, so racing first
    /// saves both succeed. The stored row keeps its original id, which
    /// tells a fresh insert apart from an update.
    async fn try_upsert(&self, review: &Review) -> Result<ReviewUpsert, TxError> {
        let mut tx = self.pool.begin().await.map_err(TxError::db)?;

        sqlx::query(
            r"
            INSERT INTO reviews (id, user_id, place_id, place_name, rating, comment, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                rating = VALUES(rating),
                comment = VALUES(comment),
                place_name = COALESCE(VALUES(place_name), place_name),
                updated_at = VALUES(updated_at)
            ",
        )
        .bind(review.id.into_inner())
        .bind(review.user_id.into_inner())
        .bind(&review.place_id)
        .bind(&review.place_name)
        .bind(i32::from(review.rating))
        .bind(&review.comment)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(TxError::db)?;

        let stored = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ? AND place_id = ?"
        ))
        .bind(review.user_id.into_inner())
        .bind(&review.place_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(TxError::db)?;

        tx.commit().await.map_err(TxError::db)?;

        let stored = Review::from(stored);
        Ok(ReviewUpsert {
            created: stored.id == review.id,
            review: stored,
        })
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn find_with_author(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ReviewWithAuthor>> {
        let result = sqlx::query_as::<_, ReviewWithAuthorModel>(&format!(
            "{REVIEW_WITH_AUTHOR_SELECT} WHERE r.id = ?"
        ))
        .bind(viewer.map(Snowflake::into_inner))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReviewWithAuthor::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &ReviewQuery) -> RepoResult<Vec<ReviewWithAuthor>> {
        let user_id = query.user_id.map(Snowflake::into_inner);

        let rows = sqlx::query_as::<_, ReviewWithAuthorModel>(&format!(
            r"{REVIEW_WITH_AUTHOR_SELECT}
            WHERE (? IS NULL OR r.place_id = ?)
              AND (? IS NULL OR r.user_id = ?)
            ORDER BY r.created_at DESC, r.id DESC
            "
        ))
        .bind(query.viewer.map(Snowflake::into_inner))
        .bind(query.place_id.as_deref())
        .bind(query.place_id.as_deref())
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
    }

    #[instrument(skip(self, review), fields(user_id = %review.user_id, place_id = %review.place_id))]
    async fn upsert(&self, review: &Review) -> RepoResult<ReviewUpsert> {
        retry_on_deadlock(|| self.try_upsert(review)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // review_likes rows go with the review (ON DELETE CASCADE)
        let result = sqlx::query(
            r"
            DELETE FROM reviews WHERE id = ?
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn toggle_like(&self, review_id: Snowflake, user_id: Snowflake) -> RepoResult<LikeToggle> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes concurrent toggles on the same review
        let locked = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM reviews WHERE id = ? FOR UPDATE
            ",
        )
        .bind(review_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(DomainError::ReviewNotFound(review_id));
        }

        let removed = sqlx::query(
            r"
            DELETE FROM review_likes WHERE review_id = ? AND user_id = ?
            ",
        )
        .bind(review_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let liked = removed.rows_affected() == 0;
        if liked {
            sqlx::query(
                r"
                INSERT INTO review_likes (review_id, user_id, created_at) VALUES (?, ?, ?)
                ",
            )
            .bind(review_id.into_inner())
            .bind(user_id.into_inner())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let likes_count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM review_likes WHERE review_id = ?
            ",
        )
        .bind(review_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LikeToggle { liked, likes_count })
    }
}
