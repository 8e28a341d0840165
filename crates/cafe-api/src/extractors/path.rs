//! Path parameter extractors
//!
//! Snowflake IDs arrive as strings; malformed ones are a 400.

use cafe_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Parse a path segment as a Snowflake
pub fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// `/:id` of reviews and lists
#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: String,
}

impl IdPath {
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "id")
    }
}

/// `/users/:user_id/...`
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// `/lists/:id/items/:place_id`
#[derive(Debug, Deserialize)]
pub struct ListItemPath {
    pub id: String,
    pub place_id: String,
}

impl ListItemPath {
    pub fn list_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "id")
    }
}
