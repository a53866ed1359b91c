//! Password hashing
//!
//! One-way salted hashing and verification of user credentials using Argon2.
//! Digests are self-describing PHC strings carrying the algorithm, cost
//! parameters, and salt, so verification needs no out-of-band state.

use crate::utils::error::{ChirpError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash a password using Argon2
///
/// A fresh random salt is generated per call, so two hashes of the same
/// password differ byte-for-byte.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ChirpError::crypto(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a password against its stored hash
///
/// A wrong password is `Ok(false)`; only a structurally invalid digest is an
/// error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ChirpError::crypto(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ChirpError::crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correctPassword123!").unwrap();
        assert!(verify_password("correctPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hash = hash_password("correctPassword123!").unwrap();
        assert!(!verify_password("anotherPassword456?", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("correctPassword123!").unwrap();
        let second = hash_password("correctPassword123!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_digest_is_error() {
        let result = verify_password("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(ChirpError::Crypto(_))));
    }
}
