//! Domain entities - core business objects

mod favorite;
mod list;
mod place;
mod review;
mod user;

pub use favorite::{normalize_photo_url, Favorite, MAX_PHOTO_URL_LEN};
pub use list::{CafeList, ListChanges, ListPlace, LIST_NAME_MAX_LEN};
pub use place::Place;
pub use review::{
    LikeToggle, Review, ReviewAuthor, ReviewQuery, ReviewUpsert, ReviewWithAuthor, MAX_RATING,
    MIN_RATING,
};
pub use user::{avatar_url_for, ProfileChanges, User, UPLOADS_PREFIX};
