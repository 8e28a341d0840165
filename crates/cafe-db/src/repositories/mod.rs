//! Repository implementations
//!
//! MySQL implementations of the repository traits defined in cafe-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod favorite;
mod list;
mod review;
mod user;

pub use favorite::MySqlFavoriteRepository;
pub use list::MySqlListRepository;
pub use review::MySqlReviewRepository;
pub use user::MySqlUserRepository;
