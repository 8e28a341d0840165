//! Avatar upload validation and file naming

use std::path::Path;

use cafe_core::error::DomainError;
use cafe_core::value_objects::Snowflake;
use rand::Rng;

/// Accepted image types; both the file extension and the MIME subtype must match one
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// An uploaded avatar as received from the multipart form
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// Client-side file name, used only for its extension
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Validated, lowercased extension of an upload
pub fn avatar_extension(file_name: &str, content_type: &str) -> Result<String, DomainError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_IMAGE_TYPES.contains(&ext.as_str()));

    let mime_ok = content_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| ALLOWED_IMAGE_TYPES.contains(&subtype));

    match extension {
        Some(ext) if mime_ok => Ok(ext),
        _ => Err(DomainError::UnsupportedFileType(format!(
            "{file_name} ({content_type})"
        ))),
    }
}

/// `avatar-{user}-{millis}-{random}.{ext}`
pub fn avatar_file_name(user_id: Snowflake, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("avatar-{user_id}-{millis}-{suffix}.{extension}")
}
