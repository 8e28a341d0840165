//! Ports implemented by the infrastructure crates

mod repositories;
mod stores;

pub use repositories::{
    FavoriteRepository, ListRepository, RepoResult, ReviewRepository, UserRepository,
};
pub use stores::{AvatarStore, SessionStore};
