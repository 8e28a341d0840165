//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path IDs.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{parse_id, IdPath, ListItemPath, UserIdPath};
pub use validated::ValidatedJson;
