use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use super::domain::PasswordDigest;
use crate::config::PasswordHashConfig;

/// One-way salted hashing primitive used for active passwords and their history.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError>;

    /// Returns `Ok(false)` on a mismatch and `Err` when the digest cannot be compared at all.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, HashError>;
}

/// Failures raised by the hashing primitive.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid hashing parameters: {0}")]
    Parameters(String),
    #[error("malformed password hash: {0}")]
    Malformed(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Argon2id hasher producing PHC strings.
///
/// New hashes use the configured cost. Verification re-derives with the salt and cost
/// embedded in each stored hash, so older hashes keep verifying after a cost change.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| HashError::Parameters(err.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| HashError::Hashing(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(digest.as_str()).map_err(|err| HashError::Malformed(err.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(other) => Err(HashError::Malformed(other.to_string())),
        }
    }
}
