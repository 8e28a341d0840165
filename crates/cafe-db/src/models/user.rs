//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub surname: Option<String>,
    pub nickname: String,
    pub email: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
