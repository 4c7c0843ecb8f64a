//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...`) with a fresh random salt
//! from the operating system RNG. Verification reads the parameters back out
//! of the stored string, so changing the cost only affects new hashes.

use argon2::password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = password_hash::PasswordHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    fn hash_then_verify(hasher: Argon2PasswordHasher) {
        let password = Password::new("testpass123").expect("valid password");
        let hash = hasher.hash(&password).expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("testpass123"));
        assert!(hasher.verify("testpass123", &hash).expect("verify"));
        assert!(!hasher.verify("wrongpass", &hash).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let password = Password::new("testpass123").expect("valid password");
        let first = hasher.hash(&password).expect("hash");
        let second = hasher.hash(&password).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let result = hasher.verify("testpass123", &PasswordHash::new("plaintext"));
        assert!(matches!(
            result,
            Err(PasswordHashError::MalformedHash { .. })
        ));
    }

    #[rstest]
    #[case("testpass123")]
    #[case("")]
    fn decoy_hash_parses_and_never_matches(hasher: Argon2PasswordHasher, #[case] candidate: &str) {
        let decoy = PasswordHash::new(crate::domain::account_service::DECOY_PASSWORD_HASH);
        assert!(!hasher.verify(candidate, &decoy).expect("decoy is well formed"));
    }
}
