use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::{CoreError, CoreResult};

/// Argon2id hash with the default cost parameters whose password nobody knows.
/// Logins for unknown usernames verify against it so they cost the same as a
/// wrong password for a real account.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hashes a password with Argon2id and a fresh random salt, returning the PHC string.
pub fn hash_password(plain: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Checks a password against a stored PHC string. The comparison runs in constant time.
pub fn verify_password(plain: &str, stored: &str) -> CoreResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CoreError::InternalError(format!("Stored password hash is malformed: {}", e)))?;

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::InternalError(format!("Password verification failed: {}", e))),
    }
}

/// Runs a full verification that can never succeed.
pub fn verify_unknown_user(plain: &str) {
    if let Err(e) = verify_password(plain, UNKNOWN_USER_HASH) {
        tracing::error!(error = %e, "Unknown-user password check failed");
    }
}
