//! # cafe-service
//!
//! Application layer containing business logic, services, DTOs and avatar
//! file storage.

pub mod dto;
pub mod services;
pub mod storage;

#[cfg(test)]
mod testing;

pub use services::{
    AuthService, FavoriteService, ListService, ProfileService, ReviewService, SavedReview,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
pub use storage::{AvatarUpload, DiskAvatarStore};
