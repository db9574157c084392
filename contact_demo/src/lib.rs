use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use contact_models::contact::{ContactCandidate, ContactSubmission};

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| DateTime::from_timestamp(1_717_243_200, 123_000_000).unwrap());

pub static JANE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jane Doe".try_into().unwrap(),
    email: "jane@example.com".try_into().unwrap(),
    message: "This is a valid ten-plus char message.".try_into().unwrap(),
});

/// Fails locally: name and message are too short.
pub static TOO_SHORT: LazyLock<ContactCandidate> =
    LazyLock::new(|| ContactCandidate::new("J", "jane@example.com", "short"));

/// Passes length checks but violates the name and email grammar.
pub static INVALID_GRAMMAR: LazyLock<ContactCandidate> = LazyLock::new(|| {
    ContactCandidate::new("Jane123", "not-an-email", "Valid length message here.")
});
