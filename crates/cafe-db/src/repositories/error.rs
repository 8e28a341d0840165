//! Error handling utilities for repositories

use std::future::Future;

use cafe_core::error::DomainError;
use cafe_core::traits::RepoResult;
use sqlx::mysql::MySqlDatabaseError;
use sqlx::Error as SqlxError;
use tracing::warn;

/// MySQL `ER_LOCK_DEADLOCK`: the transaction was rolled back
const ER_LOCK_DEADLOCK: u16 = 1213;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(&str) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            // MySQL names the violated key in the message:
            // "Duplicate entry 'x' for key 'users.uq_users_email'"
            return on_unique(db_err.message());
        }
    }
    map_db_error(e)
}

/// Pick the identity conflict named by a duplicate-key message
pub fn user_identity_conflict(message: &str) -> DomainError {
    if message.contains("uq_users_nickname") {
        DomainError::NicknameTaken
    } else if message.contains("uq_users_email") {
        DomainError::EmailTaken
    } else {
        DomainError::DatabaseError(message.to_string())
    }
}

/// Whether MySQL rolled the transaction back as a deadlock victim
pub fn is_deadlock(e: &SqlxError) -> bool {
    e.as_database_error()
        .and_then(|db| db.try_downcast_ref::<MySqlDatabaseError>())
        .is_some_and(|db| db.number() == ER_LOCK_DEADLOCK)
}

/// Failure of a single write transaction attempt
#[derive(Debug)]
pub enum TxError {
    Deadlock(SqlxError),
    Domain(DomainError),
}

impl TxError {
    pub fn db(e: SqlxError) -> Self {
        if is_deadlock(&e) {
            Self::Deadlock(e)
        } else {
            Self::Domain(map_db_error(e))
        }
    }

    /// Like [`TxError::db`], with duplicate keys mapped by `on_unique`
    pub fn unique<F>(e: SqlxError, on_unique: F) -> Self
    where
        F: FnOnce(&str) -> DomainError,
    {
        if is_deadlock(&e) {
            Self::Deadlock(e)
        } else {
            Self::Domain(map_unique_violation(e, on_unique))
        }
    }

    pub fn into_domain(self) -> DomainError {
        match self {
            Self::Deadlock(e) => map_db_error(e),
            Self::Domain(e) => e,
        }
    }
}

impl From<DomainError> for TxError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// Run a write transaction, retrying once if it loses a deadlock
///
/// Gap locks taken by `SELECT ... FOR UPDATE` on absent rows do not block
/// each other, so two racing inserts can deadlock. The retry runs after the
/// winner committed and sees its rows.
pub async fn retry_on_deadlock<T, F, Fut>(mut attempt: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TxError>>,
{
    match attempt().await {
        Err(TxError::Deadlock(e)) => {
            warn!(error = %e, "Transaction lost a deadlock, retrying");
            attempt().await.map_err(TxError::into_domain)
        }
        other => other.map_err(TxError::into_domain),
    }
}
