//! Avatar file storage
//!
//! Upload validation and naming live in [`avatar`]; [`DiskAvatarStore`]
//! writes the accepted bytes under the configured upload directory.

pub mod avatar;
mod disk;

pub use avatar::{avatar_extension, avatar_file_name, AvatarUpload, ALLOWED_IMAGE_TYPES};
pub use disk::DiskAvatarStore;
