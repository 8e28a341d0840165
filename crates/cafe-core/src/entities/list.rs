//! Curated lists of places

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const LIST_NAME_MAX_LEN: usize = 100;

/// A user-owned named collection of places
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeList {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CafeList {
    /// Create a public list; the name is trimmed and must not be blank
    pub fn new(id: Snowflake, user_id: Snowflake, name: &str) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id,
            user_id,
            name: Self::normalize_name(name)?,
            description: None,
            is_public: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("List name is required".to_string()));
        }
        if trimmed.chars().count() > LIST_NAME_MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "List name must be at most {LIST_NAME_MAX_LEN} characters"
            )));
        }
        Ok(trimmed.to_string())
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Public lists are visible to everyone, private ones only to the owner
    pub fn ensure_visible_to(&self, viewer: Option<Snowflake>) -> Result<(), DomainError> {
        if self.is_public || viewer.is_some_and(|v| self.is_owned_by(v)) {
            Ok(())
        } else {
            Err(DomainError::PrivateList)
        }
    }

    pub fn ensure_owner(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::NotListOwner)
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, changes: &ListChanges) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Err(DomainError::NothingToUpdate);
        }
        if let Some(name) = &changes.name {
            self.name = Self::normalize_name(name)?;
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(is_public) = changes.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Partial list update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl ListChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_public.is_none()
    }
}

/// A place saved in a list
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlace {
    pub id: Snowflake,
    pub list_id: Snowflake,
    pub place_id: String,
    pub place_name: Option<String>,
    pub place_photo: Option<String>,
    pub place_rating: Option<f64>,
    pub place_vicinity: Option<String>,
    pub added_at: DateTime<Utc>,
}
