//! Password hashing for user accounts
//!
//! Passwords are hashed with Argon2id and a random per-user salt, stored as a
//! PHC string so the parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{Error, Result};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password into a PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string
///
/// A wrong password is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::PasswordHash(format!("Stored hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check registration credentials, returning every problem found
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    let mut problems = Vec::new();
    let email = email.trim();
    if email.is_empty() {
        problems.push("email: Email is required".to_string());
    } else if !email.contains('@') {
        problems.push("email: Email is invalid".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        problems.push(format!(
            "password: Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidData(problems.join(", ")))
    }
}
