//! Password hashing with Argon2id. Hashes are stored as PHC strings,
//! salted per call, so two hashes of the same plaintext never match
//! byte-for-byte but both verify.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::error::CoreError;

pub fn hash_password(plaintext: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CoreError::Corrupt(format!("argon2 hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// `Ok(false)` for a wrong password. The only error case is a stored hash
/// that does not parse as a PHC string, which means the row itself is
/// damaged and the caller should treat it as a data-corruption incident.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CoreError::Corrupt(format!("stored password hash unparseable: {e}")))?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn same_plaintext_fresh_salt() {
        let a = hash_password("correct horse").unwrap();
        let b = hash_password("correct horse").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("correct horse", &a).unwrap());
        assert!(verify_password("correct horse", &b).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_corruption() {
        let err = verify_password("whatever", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, CoreError::Corrupt(_)));
    }
}
