use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of previously used passwords a user may not reuse.
pub const PASSWORD_HISTORY_LIMIT: usize = 5;

/// Opaque one-way hash of a password in PHC string form.
///
/// `Debug` is redacted so digests do not end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A password hash that was the active credential at some point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHistoryEntry {
    pub hash: PasswordDigest,
    pub changed_at: DateTime<Utc>,
}

/// Rotation window of recently used passwords, newest first.
///
/// Never holds more than [`PASSWORD_HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PasswordHistoryEntry>", into = "Vec<PasswordHistoryEntry>")]
pub struct PasswordHistory {
    entries: Vec<PasswordHistoryEntry>,
}

impl PasswordHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from entries ordered newest first, dropping anything past the window.
    pub fn from_entries(mut entries: Vec<PasswordHistoryEntry>) -> Self {
        entries.truncate(PASSWORD_HISTORY_LIMIT);
        Self { entries }
    }

    pub fn entries(&self) -> &[PasswordHistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PasswordHistoryEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&PasswordHistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<PasswordHistoryEntry>> for PasswordHistory {
    fn from(entries: Vec<PasswordHistoryEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<PasswordHistory> for Vec<PasswordHistoryEntry> {
    fn from(history: PasswordHistory) -> Self {
        history.entries
    }
}

impl<'a> IntoIterator for &'a PasswordHistory {
    type Item = &'a PasswordHistoryEntry;
    type IntoIter = std::slice::Iter<'a, PasswordHistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
