use std::sync::Arc;

use tracing::info;

use super::domain::PasswordHistory;
use super::guard::{append_to_history, PasswordHistoryGuard};
use super::hasher::{CredentialHasher, HashError};
use super::repository::{CredentialRecord, CredentialRepository, RepositoryError};
use crate::identity::UserId;

/// Service composing the reuse guard, the hasher, and credential storage.
pub struct PasswordRotationService<R, H> {
    guard: PasswordHistoryGuard<H>,
    hasher: Arc<H>,
    repository: Arc<R>,
}

impl<R, H> PasswordRotationService<R, H>
where
    R: CredentialRepository + 'static,
    H: CredentialHasher + 'static,
{
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            guard: PasswordHistoryGuard::new(Arc::clone(&hasher)),
            hasher,
            repository,
        }
    }

    /// Create the credential record for a new account. The first password enters the history
    /// immediately.
    pub fn set_initial_password(
        &self,
        user_id: &UserId,
        password: &str,
    ) -> Result<CredentialRecord, PasswordRotationError> {
        let digest = self.hasher.hash(password)?;
        let history = append_to_history(digest.clone(), &PasswordHistory::new());

        let stored = self.repository.insert(CredentialRecord {
            user_id: user_id.clone(),
            current_hash: digest,
            history,
            version: 1,
        })?;

        info!(user_id = %user_id, "initial password set");
        Ok(stored)
    }

    /// Rotate to `new_password`, refusing any password still inside the reuse window.
    pub fn change_password(
        &self,
        user_id: &UserId,
        new_password: &str,
    ) -> Result<CredentialRecord, PasswordRotationError> {
        let record = self
            .repository
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?;

        if self
            .guard
            .was_password_used_before(new_password, &record.history)
        {
            info!(user_id = %user_id, "rejected reused password");
            return Err(PasswordRotationError::PasswordReused);
        }

        let digest = self.hasher.hash(new_password)?;
        let updated = CredentialRecord {
            user_id: record.user_id.clone(),
            history: append_to_history(digest.clone(), &record.history),
            current_hash: digest,
            version: record.version + 1,
        };

        self.repository.replace(updated.clone(), record.version)?;

        info!(
            user_id = %user_id,
            history_len = updated.history.len(),
            version = updated.version,
            "password rotated"
        );
        Ok(updated)
    }

    /// Check `password` against the active credential only.
    pub fn verify_login(
        &self,
        user_id: &UserId,
        password: &str,
    ) -> Result<bool, PasswordRotationError> {
        let record = self
            .repository
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?;
        let matched = self.hasher.verify(password, &record.current_hash)?;
        Ok(matched)
    }
}

/// Error raised by the rotation service.
#[derive(Debug, thiserror::Error)]
pub enum PasswordRotationError {
    #[error("password was used recently and cannot be reused")]
    PasswordReused,
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
