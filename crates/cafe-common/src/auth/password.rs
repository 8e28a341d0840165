//! Password hashing and verification utilities
//!
//! Uses Argon2id with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use cafe_core::DomainError;

use crate::error::AppError;

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 128;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// A malformed hash is an internal error, a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password strength
///
/// Requires 6-128 characters with at least one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(DomainError::WeakPassword(format!(
            "must be at least {PASSWORD_MIN_LEN} characters long"
        )));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(DomainError::WeakPassword(format!(
            "must be at most {PASSWORD_MAX_LEN} characters long"
        )));
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(DomainError::WeakPassword(
            "must contain at least one letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::WeakPassword(
            "must contain at least one digit".to_string(),
        ));
    }
    Ok(())
}
