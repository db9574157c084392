use std::sync::LazyLock;

use regex::Regex;

pub mod contact;
pub mod contract;

pub static CONTACT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// Checks the email address grammar accepted by the contact form.
///
/// The local part may not start with a dot and no two dots may follow each
/// other anywhere in the address.
pub fn is_email_address(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && CONTACT_EMAIL_REGEX.is_match(email)
}
