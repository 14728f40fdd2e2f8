//! Argon2id password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::AuthError;

/// Hashes and verifies passwords as self-describing PHC strings
/// (`$argon2id$v=19$m=...`).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    min_password_length: usize,
}

impl PasswordHasher {
    pub fn new(min_password_length: usize) -> Self {
        Self {
            params: Params::default(),
            min_password_length,
        }
    }

    /// Override the Argon2 cost parameters (memory in KiB, iterations, lanes).
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Same as [`with_params`](Self::with_params) with the default lane count.
    pub fn with_cost(self, memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(self.with_params(params))
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::PasswordTooShort {
                min: self.min_password_length,
            });
        }

        self.hash_unchecked(password)
    }

    /// A real hash of a throwaway secret at the configured cost. Verifying
    /// against it costs the same as verifying against a stored hash.
    pub fn dummy_hash(&self) -> Result<String, AuthError> {
        self.hash_unchecked("storefront-login-placeholder")
    }

    fn hash_unchecked(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// `Ok(false)` means "wrong password"; `Err` means the stored hash is unusable.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;

        // Cost parameters are read back from the PHC string.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Hash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(8).with_cost(1024, 1).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = cheap();
        let hash = hasher.hash("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = cheap();
        assert_ne!(hasher.hash("password1").unwrap(), hasher.hash("password1").unwrap());
    }

    #[test]
    fn short_passwords_are_rejected() {
        let err = cheap().hash("short").unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort { min: 8 }));
    }

    #[test]
    fn dummy_hash_ignores_min_length() {
        let hasher = PasswordHasher::new(64).with_cost(1024, 1).unwrap();
        let dummy = hasher.dummy_hash().unwrap();
        assert!(dummy.starts_with("$argon2id$"));
        assert!(!hasher.verify("correct horse", &dummy).unwrap());
    }

    #[test]
    fn invalid_cost_is_rejected() {
        assert!(PasswordHasher::new(8).with_cost(1024, 0).is_err());
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_mismatch() {
        assert!(cheap().verify("whatever", "not-a-phc-string").is_err());
    }
}
