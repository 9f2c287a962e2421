//! Password hashing and verification using Argon2id
//!
//! The hash+verify pair is the only surface the rest of the service sees;
//! the PHC string output carries the algorithm parameters and salt, so a
//! stored hash is self-describing.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use revue_core::{Result, RevueError};

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| RevueError::Store(format!("password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash
///
/// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| RevueError::Store("invalid password hash format".to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(RevueError::Store(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1-secret").expect("hashing failed");

        assert!(verify_password("pw1-secret", &hash).unwrap());
        assert!(!verify_password("pw2-wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn test_invalid_hash_format_is_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(result.is_err());
    }
}
