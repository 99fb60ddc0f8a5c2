//! Password reuse prevention over a bounded rotation window.
//!
//! The guard and the history transform are pure; the rotation service owns the
//! read-check-append-write cycle and relies on the repository's version check to keep
//! concurrent rotations from dropping history entries.

pub mod domain;
mod guard;
pub mod hasher;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{PasswordDigest, PasswordHistory, PasswordHistoryEntry, PASSWORD_HISTORY_LIMIT};
pub use guard::{append_to_history, append_to_history_at, PasswordHistoryGuard};
pub use hasher::{Argon2Hasher, CredentialHasher, HashError};
pub use repository::{CredentialRecord, CredentialRepository, RepositoryError};
pub use router::{password_router, CredentialStatusView, PasswordRequest};
pub use service::{PasswordRotationError, PasswordRotationService};
