//! Session storage module.
//!
//! Redis-backed refresh sessions implementing [`cafe_core::traits::SessionStore`].

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
