use serde::{Deserialize, Serialize};

use super::domain::{PasswordDigest, PasswordHistory};
use crate::identity::UserId;

/// Persisted credential state for one account.
///
/// `version` increases by one on every write so concurrent rotations can be detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub user_id: UserId,
    pub current_hash: PasswordDigest,
    pub history: PasswordHistory,
    pub version: u64,
}

/// Storage abstraction so the rotation service can be exercised in isolation.
pub trait CredentialRepository: Send + Sync {
    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, RepositoryError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<CredentialRecord>, RepositoryError>;

    /// Store `record` only if the stored version still equals `expected_version`.
    fn replace(&self, record: CredentialRecord, expected_version: u64)
        -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict { expected: u64, found: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
