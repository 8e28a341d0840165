//! MySQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::instrument;

use cafe_core::entities::User;
use cafe_core::error::DomainError;
use cafe_core::traits::{RepoResult, UserRepository};
use cafe_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{map_db_error, retry_on_deadlock, user_identity_conflict, TxError};

const USER_COLUMNS: &str =
    "id, name, surname, nickname, email, avatar_path, created_at, updated_at";

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySqlUserRepository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lock-and-check nickname then email inside the caller's transaction
    async fn ensure_identity_free(
        tx: &mut Transaction<'_, MySql>,
        user: &User,
        exclude: Option<Snowflake>,
    ) -> Result<(), TxError> {
        let exclude = exclude.map(Snowflake::into_inner);

        let nickname_owner = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM users
            WHERE nickname = ? AND (? IS NULL OR id <> ?)
            LIMIT 1
            FOR UPDATE
            ",
        )
        .bind(&user.nickname)
        .bind(exclude)
        .bind(exclude)
        .fetch_optional(&mut **tx)
        .await
        .map_err(TxError::db)?;

        if nickname_owner.is_some() {
            return Err(DomainError::NicknameTaken.into());
        }

        let email_owner = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM users
            WHERE email = ? AND (? IS NULL OR id <> ?)
            LIMIT 1
            FOR UPDATE
            ",
        )
        .bind(&user.email)
        .bind(exclude)
        .bind(exclude)
        .fetch_optional(&mut **tx)
        .await
        .map_err(TxError::db)?;

        if email_owner.is_some() {
            return Err(DomainError::EmailTaken.into());
        }

        Ok(())
    }

    async fn try_create(&self, user: &User, password_hash: &str) -> Result<(), TxError> {
        let mut tx = self.pool.begin().await.map_err(TxError::db)?;

        Self::ensure_identity_free(&mut tx, user, None).await?;

        sqlx::query(
            r"
            INSERT INTO users (id, name, surname, nickname, email, password_hash, avatar_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.avatar_path)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| TxError::unique(e, user_identity_conflict))?;

        tx.commit().await.map_err(TxError::db)?;
        Ok(())
    }

    async fn try_update_profile(&self, user: &User) -> Result<(), TxError> {
        let mut tx = self.pool.begin().await.map_err(TxError::db)?;

        Self::ensure_identity_free(&mut tx, user, Some(user.id)).await?;

        let result = sqlx::query(
            r"
            UPDATE users
            SET name = ?, surname = ?, nickname = ?, email = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(user.updated_at)
        .bind(user.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(|e| TxError::unique(e, user_identity_conflict))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id).into());
        }

        tx.commit().await.map_err(TxError::db)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? OR nickname = ? LIMIT 1"
        ))
        .bind(login)
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = ?
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn nickname_exists(&self, nickname: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        let exclude = exclude.map(Snowflake::into_inner);
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT CAST(EXISTS(
                SELECT 1 FROM users WHERE nickname = ? AND (? IS NULL OR id <> ?)
            ) AS SIGNED)
            ",
        )
        .bind(nickname)
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result != 0)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        let exclude = exclude.map(Snowflake::into_inner);
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT CAST(EXISTS(
                SELECT 1 FROM users WHERE email = ? AND (? IS NULL OR id <> ?)
            ) AS SIGNED)
            ",
        )
        .bind(email)
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result != 0)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        retry_on_deadlock(|| self.try_create(user, password_hash)).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        retry_on_deadlock(|| self.try_update_profile(user)).await
    }

    #[instrument(skip(self))]
    async fn update_avatar(&self, id: Snowflake, avatar_path: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET avatar_path = ?, updated_at = CURRENT_TIMESTAMP(3)
            WHERE id = ?
            ",
        )
        .bind(avatar_path)
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }
}
