use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::domain::{
    PasswordDigest, PasswordHistory, PasswordHistoryEntry, PASSWORD_HISTORY_LIMIT,
};
use super::hasher::CredentialHasher;

/// Stateless reuse check over a user's rotation window.
pub struct PasswordHistoryGuard<H> {
    hasher: Arc<H>,
}

impl<H> PasswordHistoryGuard<H>
where
    H: CredentialHasher,
{
    pub fn new(hasher: Arc<H>) -> Self {
        Self { hasher }
    }

    /// Whether `candidate` matches any hash in `history`.
    ///
    /// Entries that cannot be compared are logged and treated as non-matching; they never
    /// abort the check.
    pub fn was_password_used_before(&self, candidate: &str, history: &PasswordHistory) -> bool {
        history
            .iter()
            .enumerate()
            .any(|(position, entry)| match self.hasher.verify(candidate, &entry.hash) {
                Ok(matched) => matched,
                Err(error) => {
                    warn!(
                        position,
                        changed_at = %entry.changed_at,
                        %error,
                        "skipping uncomparable password history entry"
                    );
                    false
                }
            })
    }
}

impl<H> Clone for PasswordHistoryGuard<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: Arc::clone(&self.hasher),
        }
    }
}

/// Prepend `new_hash` stamped with the current time, keeping the newest five entries.
pub fn append_to_history(new_hash: PasswordDigest, existing: &PasswordHistory) -> PasswordHistory {
    append_to_history_at(new_hash, existing, Utc::now())
}

pub fn append_to_history_at(
    new_hash: PasswordDigest,
    existing: &PasswordHistory,
    changed_at: DateTime<Utc>,
) -> PasswordHistory {
    let mut entries = Vec::with_capacity(PASSWORD_HISTORY_LIMIT);
    entries.push(PasswordHistoryEntry {
        hash: new_hash,
        changed_at,
    });
    entries.extend(existing.iter().take(PASSWORD_HISTORY_LIMIT - 1).cloned());

    PasswordHistory::from_entries(entries)
}
