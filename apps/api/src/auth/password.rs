//! Password policy and hashing (bcrypt).

use anyhow::{Context, Result};

use crate::errors::AppError;

pub const MIN_PASSWORD_CHARS: usize = 6;
/// bcrypt reads at most 72 bytes of input; longer passwords are rejected
/// before hashing rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Enforces the password policy. Runs before any hashing.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(
            "Password cannot exceed 72 characters".to_string(),
        ));
    }
    Ok(())
}

/// Hashes a password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")
}

/// Verifies a password against a stored hash. A malformed hash counts as a
/// failed verification.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct() {
        let hash = hash_password("my-secure-password").unwrap();
        assert!(verify_password("my-secure-password", &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_different_salts_both_verify() {
        let hash1 = hash_password("same-password").unwrap();
        let hash2 = hash_password("same-password").unwrap();
        assert_ne!(hash1, hash2);
        assert!(verify_password("same-password", &hash1));
        assert!(verify_password("same-password", &hash2));
    }

    #[test]
    fn test_policy_too_short() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_policy_upper_bound() {
        assert!(validate_password(&"x".repeat(72)).is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn test_policy_error_messages() {
        match validate_password("short") {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Password must be at least 6 characters long")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        match validate_password(&"x".repeat(80)) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Password cannot exceed 72 characters")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
