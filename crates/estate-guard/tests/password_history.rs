//! Integration scenarios for password reuse prevention through the public API.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use estate_guard::config::PasswordHashConfig;
use estate_guard::policies::password_history::{
    append_to_history, append_to_history_at, Argon2Hasher, CredentialHasher, PasswordDigest,
    PasswordHistory, PasswordHistoryGuard, PASSWORD_HISTORY_LIMIT,
};

fn hasher() -> Argon2Hasher {
    Argon2Hasher::new(&PasswordHashConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("minimal argon2 params are valid")
}

#[test]
fn rotation_window_blocks_last_five_passwords() {
    let hasher = hasher();
    let passwords = ["loft-1", "loft-2", "loft-3", "loft-4", "loft-5", "loft-6"];

    let mut history = PasswordHistory::new();
    for password in passwords {
        let digest = hasher.hash(password).expect("hash");
        history = append_to_history(digest, &history);
    }
    assert_eq!(history.len(), PASSWORD_HISTORY_LIMIT);

    let guard = PasswordHistoryGuard::new(Arc::new(hasher));
    assert!(!guard.was_password_used_before("loft-1", &history));
    for password in &passwords[1..] {
        assert!(
            guard.was_password_used_before(password, &history),
            "{password} should still be inside the window"
        );
    }
}

#[test]
fn trimming_keeps_newest_entries_in_order() {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");

    let mut history = PasswordHistory::new();
    for index in 1..=6 {
        history = append_to_history_at(
            PasswordDigest::new(format!("h{index}")),
            &history,
            start + Duration::days(index),
        );
    }

    let labels: Vec<&str> = history.iter().map(|entry| entry.hash.as_str()).collect();
    assert_eq!(labels, vec!["h6", "h5", "h4", "h3", "h2"]);
    assert!(history
        .entries()
        .windows(2)
        .all(|pair| pair[0].changed_at > pair[1].changed_at));
}

#[test]
fn history_round_trips_through_json() {
    let history = append_to_history(PasswordDigest::new("$argon2id$v=19$abc"), &PasswordHistory::new());

    let encoded = serde_json::to_value(&history).expect("serializes");
    assert!(encoded.is_array());
    assert_eq!(encoded[0]["hash"], "$argon2id$v=19$abc");

    let decoded: PasswordHistory = serde_json::from_value(encoded).expect("deserializes");
    assert_eq!(decoded, history);
}
