//! Password hashing with Argon2

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::IdentityError;

/// Hashes and verifies passwords as Argon2id PHC strings
#[derive(Default, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, IdentityError> {
        use argon2::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verifies a password against a stored hash
    ///
    /// A malformed hash never verifies.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("motdepasse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("motdepasse", &hash));
        assert!(!hasher.verify("mauvais", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("motdepasse").unwrap(), hasher.hash("motdepasse").unwrap());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!PasswordHasher::new().verify("motdepasse", "not-a-hash"));
    }
}
