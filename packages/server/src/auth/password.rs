//! Password hashing and verification (Argon2id, PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use autolot_core::Error;

/// Minimum accepted password length at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hashes a plaintext password with a fresh random salt.
///
/// # Errors
///
/// Returns [`Error::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(Error::internal)
}

/// Verifies a plaintext password against a stored PHC-format hash.
///
/// `Ok(false)` is a mismatch; a malformed stored hash is an error, since
/// it means the record was corrupted rather than the password wrong.
///
/// # Errors
///
/// Returns [`Error::Internal`] if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| Error::internal(format!("invalid stored password hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::internal(format!("password verification: {e}"))),
    }
}
