use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::config::PasswordHashConfig;
use crate::identity::UserId;
use crate::policies::password_history::append_to_history;
use crate::policies::password_history::domain::{
    PasswordDigest, PasswordHistory, PasswordHistoryEntry,
};
use crate::policies::password_history::hasher::{Argon2Hasher, CredentialHasher, HashError};
use crate::policies::password_history::repository::{
    CredentialRecord, CredentialRepository, RepositoryError,
};
use crate::policies::password_history::service::PasswordRotationService;

pub(super) fn cheap_config() -> PasswordHashConfig {
    PasswordHashConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

pub(super) fn cheap_hasher() -> Argon2Hasher {
    Argon2Hasher::new(&cheap_config()).expect("minimal argon2 params are valid")
}

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn entry(label: &str, days_ago: i64) -> PasswordHistoryEntry {
    PasswordHistoryEntry {
        hash: PasswordDigest::new(label),
        changed_at: base_time() - Duration::days(days_ago),
    }
}

/// History of opaque labels ordered newest first, e.g. `["h5", "h4", ...]`.
pub(super) fn labelled_history(labels: &[&str]) -> PasswordHistory {
    PasswordHistory::from_entries(
        labels
            .iter()
            .enumerate()
            .map(|(index, label)| entry(label, index as i64 * 30))
            .collect(),
    )
}

pub(super) fn labels(history: &PasswordHistory) -> Vec<&str> {
    history.iter().map(|entry| entry.hash.as_str()).collect()
}

/// Deterministic stand-in: `plain:<password>` digests, `corrupt:*` digests are uncomparable.
#[derive(Default)]
pub(super) struct PlainHasher {
    pub(super) verify_calls: Mutex<Vec<String>>,
}

impl PlainHasher {
    pub(super) fn calls(&self) -> Vec<String> {
        self.verify_calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError> {
        Ok(PasswordDigest::new(format!("plain:{password}")))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, HashError> {
        self.verify_calls
            .lock()
            .expect("calls mutex poisoned")
            .push(digest.as_str().to_string());

        if digest.as_str().starts_with("corrupt:") {
            return Err(HashError::Malformed(digest.as_str().to_string()));
        }
        Ok(digest.as_str() == format!("plain:{password}"))
    }
}

/// `PlainHasher` whose `hash` holds the calling thread like a real Argon2 run.
pub(super) struct SlowHasher {
    pub(super) delay: StdDuration,
    pub(super) inner: PlainHasher,
}

impl CredentialHasher for SlowHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError> {
        std::thread::sleep(self.delay);
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, HashError> {
        self.inner.verify(password, digest)
    }
}

pub(super) struct PanickingHasher;

impl CredentialHasher for PanickingHasher {
    fn hash(&self, _password: &str) -> Result<PasswordDigest, HashError> {
        panic!("hasher crashed")
    }

    fn verify(&self, _password: &str, _digest: &PasswordDigest) -> Result<bool, HashError> {
        panic!("hasher crashed")
    }
}

pub(super) fn user() -> UserId {
    UserId::new("agent-42")
}

pub(super) fn build_service() -> (
    PasswordRotationService<MemoryCredentials, Argon2Hasher>,
    Arc<MemoryCredentials>,
) {
    let repository = Arc::new(MemoryCredentials::default());
    let service = PasswordRotationService::new(repository.clone(), Arc::new(cheap_hasher()));
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryCredentials {
    pub(super) records: Arc<Mutex<HashMap<UserId, CredentialRecord>>>,
}

impl CredentialRepository for MemoryCredentials {
    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.user_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<CredentialRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn replace(
        &self,
        record: CredentialRecord,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let current = guard
            .get(&record.user_id)
            .ok_or(RepositoryError::NotFound)?;
        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                found: current.version,
            });
        }
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}

pub(super) struct UnavailableCredentials;

impl CredentialRepository for UnavailableCredentials {
    fn insert(&self, _record: CredentialRecord) -> Result<CredentialRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn fetch(&self, _user_id: &UserId) -> Result<Option<CredentialRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn replace(
        &self,
        _record: CredentialRecord,
        _expected_version: u64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }
}

/// Lets a competing rotation to `rival` land right after every `fetch`, so the caller's
/// write always carries a stale version.
pub(super) struct RacingCredentials {
    pub(super) inner: MemoryCredentials,
    pub(super) rival: PasswordDigest,
}

impl CredentialRepository for RacingCredentials {
    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<CredentialRecord>, RepositoryError> {
        let snapshot = self.inner.fetch(user_id)?;
        if let Some(record) = &snapshot {
            let competing = CredentialRecord {
                user_id: record.user_id.clone(),
                current_hash: self.rival.clone(),
                history: append_to_history(self.rival.clone(), &record.history),
                version: record.version + 1,
            };
            self.inner.replace(competing, record.version)?;
        }
        Ok(snapshot)
    }

    fn replace(
        &self,
        record: CredentialRecord,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        self.inner.replace(record, expected_version)
    }
}
