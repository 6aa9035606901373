use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with a fresh salt.
///
/// The cost factor stays at bcrypt's default: the hash being slow is the
/// brute-force deterrent, so it must not be tuned down outside of tests.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a stored digest.
///
/// A mismatch is `Ok(false)`, not an error; only a malformed digest (which
/// indicates corrupt stored data, not a bad login attempt) propagates.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
