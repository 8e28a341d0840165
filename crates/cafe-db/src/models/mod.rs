//! Database models - SQLx-compatible structs for MySQL tables

mod favorite;
mod list;
mod review;
mod user;

pub use favorite::FavoriteModel;
pub use list::{ListModel, ListPlaceModel};
pub use review::{ReviewModel, ReviewWithAuthorModel};
pub use user::UserModel;
