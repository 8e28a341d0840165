//! User entity - an account that owns favorites, reviews and lists

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Public prefix under which avatar files are served
pub const UPLOADS_PREFIX: &str = "/uploads";

pub const NICKNAME_MIN_LEN: usize = 3;
pub const NICKNAME_MAX_LEN: usize = 32;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub surname: Option<String>,
    pub nickname: String,
    pub email: String,
    /// Stored file name of the uploaded avatar
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, name: String, nickname: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            surname: None,
            nickname,
            email,
            avatar_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public URL of the avatar, always `/uploads/<file name>`
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar_path.as_deref().and_then(avatar_url_for)
    }

    /// Replace the avatar, returning the previous file name
    pub fn set_avatar(&mut self, file_name: Option<String>) -> Option<String> {
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.avatar_path, file_name)
    }

    /// Apply a partial profile update
    ///
    /// Returns `NothingToUpdate` when the change set carries no field.
    pub fn apply(&mut self, changes: &ProfileChanges) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Err(DomainError::NothingToUpdate);
        }
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(surname) = &changes.surname {
            self.surname = Some(surname.clone()).filter(|s| !s.is_empty());
        }
        if let Some(nickname) = &changes.nickname {
            self.nickname.clone_from(nickname);
        }
        if let Some(email) = &changes.email {
            self.email.clone_from(email);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Trim a display name, rejecting one that is blank
    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("Name is required".to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Nicknames are 3-32 characters of ASCII letters, digits, `_`, `.` or `-`
    pub fn validate_nickname(nickname: &str) -> Result<(), DomainError> {
        let len = nickname.chars().count();
        if !(NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&len) {
            return Err(DomainError::InvalidNickname(format!(
                "must be {NICKNAME_MIN_LEN}-{NICKNAME_MAX_LEN} characters"
            )));
        }
        if !nickname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(DomainError::InvalidNickname(
                "only letters, digits, '_', '.' and '-' are allowed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Build the public URL for a stored avatar path
///
/// Older rows may hold a full path, so only the file name is kept.
pub fn avatar_url_for(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("{UPLOADS_PREFIX}/{name}"))
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.nickname.is_none() && self.email.is_none()
    }
}
