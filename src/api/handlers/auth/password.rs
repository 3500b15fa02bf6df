//! Password hashing and verification using Argon2id.

use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Syntactically valid Argon2id hash carrying the default cost parameters.
/// Verified when an identifier is unknown so response timing stays flat and
/// does not reveal whether an account exists.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$QUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUE";

/// Hash a plaintext secret into a PHC string for storage.
pub(super) fn hash_password(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash password: {e}"))
}

/// Verify a plaintext secret against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an error if the
/// stored hash is malformed.
pub(super) fn verify_password(secret: &str, hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| anyhow!("invalid password hash format: {e}"))?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("password verify error: {e}")),
    }
}

/// Burn one verification against the dummy hash for unknown identifiers.
pub(super) fn burn_password_check(secret: &str) {
    let _ = verify_password(secret, DUMMY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() -> Result<()> {
        let hash = hash_password("hunter2")?;
        assert!(verify_password("hunter2", &hash)?);
        Ok(())
    }

    #[test]
    fn wrong_password_does_not_match() -> Result<()> {
        let hash = hash_password("hunter2")?;
        assert!(!verify_password("wrong", &hash)?);
        Ok(())
    }

    #[test]
    fn malformed_hash_returns_error() {
        let result = verify_password("pw", "not-a-hash");
        assert!(result.is_err());
    }

    #[test]
    fn dummy_hash_parses_and_never_matches() -> Result<()> {
        assert!(!verify_password("anything", DUMMY_HASH)?);
        burn_password_check("anything");
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash_password("same-secret")?;
        let second = hash_password("same-secret")?;
        assert_ne!(first, second);
        assert!(verify_password("same-secret", &first)?);
        assert!(verify_password("same-secret", &second)?);
        Ok(())
    }
}
