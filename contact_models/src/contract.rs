//! The validation contract shared by the contact form client and the
//! submission endpoint.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    contact::{
        ContactCandidate, ContactEmail, ContactField, ContactMessageText, ContactName,
        ContactSubmission, FieldErrors, FieldInput, EMAIL_MAX_CHARS, MESSAGE_MAX_CHARS,
        MESSAGE_MIN_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS,
    },
    is_email_address, CONTACT_NAME_REGEX,
};

pub const REQUIRED_MESSAGE: &str = "Required";

/// The complete rule set, in the order fields are reported.
pub const CONTACT_SCHEMA: [FieldSchema; 3] = [
    FieldSchema {
        field: ContactField::Name,
        rules: &[
            Rule::MinChars(NAME_MIN_CHARS),
            Rule::MaxChars(NAME_MAX_CHARS),
            Rule::Format(Format::LettersAndSpaces),
        ],
    },
    FieldSchema {
        field: ContactField::Email,
        rules: &[Rule::Format(Format::Email), Rule::MaxChars(EMAIL_MAX_CHARS)],
    },
    FieldSchema {
        field: ContactField::Message,
        rules: &[
            Rule::MinChars(MESSAGE_MIN_CHARS),
            Rule::MaxChars(MESSAGE_MAX_CHARS),
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub field: ContactField,
    pub rules: &'static [Rule],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum Rule {
    MinChars(usize),
    MaxChars(usize),
    Format(Format),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    LettersAndSpaces,
    Email,
}

impl Rule {
    pub fn is_satisfied_by(self, value: &str) -> bool {
        match self {
            Self::MinChars(min) => value.chars().count() >= min,
            Self::MaxChars(max) => value.chars().count() <= max,
            Self::Format(Format::LettersAndSpaces) => CONTACT_NAME_REGEX.is_match(value),
            Self::Format(Format::Email) => is_email_address(value),
        }
    }

    pub fn message(self, field: ContactField) -> String {
        let label = field.label();
        match self {
            Self::MinChars(min) => format!("{label} must be at least {min} characters"),
            Self::MaxChars(max) => format!("{label} must be less than {max} characters"),
            Self::Format(Format::LettersAndSpaces) => {
                format!("{label} can only contain letters and spaces")
            }
            Self::Format(Format::Email) => "Please enter a valid email address".into(),
        }
    }
}

impl FieldSchema {
    pub fn for_field(field: ContactField) -> &'static Self {
        match field {
            ContactField::Name => &CONTACT_SCHEMA[0],
            ContactField::Email => &CONTACT_SCHEMA[1],
            ContactField::Message => &CONTACT_SCHEMA[2],
        }
    }

    /// Returns one message per violated rule.
    pub fn check(&self, input: &FieldInput) -> Vec<String> {
        match input {
            FieldInput::Missing => vec![REQUIRED_MESSAGE.into()],
            FieldInput::WrongType(received) => vec![format!("Expected string, received {received}")],
            FieldInput::Text(value) => self
                .rules
                .iter()
                .filter(|rule| !rule.is_satisfied_by(value))
                .map(|rule| rule.message(self.field))
                .collect(),
        }
    }
}

/// Validates a single field, returning its error messages.
pub fn validate_field(field: ContactField, input: &FieldInput) -> Vec<String> {
    FieldSchema::for_field(field).check(input)
}

/// Turns a candidate into a [`ContactSubmission`], or reports every
/// violation of every field.
pub fn validate(candidate: &ContactCandidate) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = typed_field(&mut errors, candidate, ContactField::Name, |value| {
        ContactName::try_new(value)
    });
    let email = typed_field(&mut errors, candidate, ContactField::Email, |value| {
        ContactEmail::try_new(value)
    });
    let message = typed_field(&mut errors, candidate, ContactField::Message, |value| {
        ContactMessageText::try_new(value)
    });

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactSubmission {
            name,
            email,
            message,
        }),
        _ => Err(errors),
    }
}

fn typed_field<T, E: Display>(
    errors: &mut FieldErrors,
    candidate: &ContactCandidate,
    field: ContactField,
    build: impl FnOnce(String) -> Result<T, E>,
) -> Option<T> {
    let input = candidate.get(field);
    let messages = validate_field(field, input);
    if !messages.is_empty() {
        for message in messages {
            errors.push(field, message);
        }
        return None;
    }

    let value = input.as_text()?.to_owned();
    build(value)
        .inspect_err(|err| errors.push(field, err.to_string()))
        .ok()
}

#[cfg(test)]
mod tests {
    use contact_utils::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const VALID_NAME: &str = "Jane Doe";
    const VALID_EMAIL: &str = "jane@example.com";
    const VALID_MESSAGE: &str = "This is a valid ten-plus char message.";

    fn messages(errors: &FieldErrors, field: ContactField) -> Vec<&str> {
        errors.messages(field).collect()
    }

    #[test]
    fn ok() {
        // Arrange
        let candidate = ContactCandidate::new(VALID_NAME, VALID_EMAIL, VALID_MESSAGE);

        // Act
        let result = validate(&candidate);

        // Assert
        let submission = result.unwrap();
        assert_eq!(submission.name.as_str(), VALID_NAME);
        assert_eq!(submission.email.as_str(), VALID_EMAIL);
        assert_eq!(submission.message.as_str(), VALID_MESSAGE);
    }

    #[test]
    fn idempotent() {
        let submission = validate(&ContactCandidate::new(VALID_NAME, VALID_EMAIL, VALID_MESSAGE))
            .unwrap();

        let result = validate(&submission.clone().into());

        assert_eq!(result, Ok(submission));
    }

    #[test]
    fn boundaries() {
        for (name, email, message) in [
            ("Jo".to_owned(), VALID_EMAIL.to_owned(), "x".repeat(10)),
            ("J".repeat(100), VALID_EMAIL.to_owned(), "x".repeat(1000)),
            (
                VALID_NAME.to_owned(),
                format!("{}@example.com", "a".repeat(243)),
                VALID_MESSAGE.to_owned(),
            ),
            (VALID_NAME.to_owned(), VALID_EMAIL.to_owned(), "ü".repeat(10)),
        ] {
            let candidate = ContactCandidate::new(name, email, message);
            assert_matches!(validate(&candidate), Ok(_));
        }
    }

    #[test]
    fn single_violation_names_field() {
        for (candidate, field, expected) in [
            (
                ContactCandidate::new("J", VALID_EMAIL, VALID_MESSAGE),
                ContactField::Name,
                "Name must be at least 2 characters",
            ),
            (
                ContactCandidate::new("J".repeat(101), VALID_EMAIL, VALID_MESSAGE),
                ContactField::Name,
                "Name must be less than 100 characters",
            ),
            (
                ContactCandidate::new("Jane 2", VALID_EMAIL, VALID_MESSAGE),
                ContactField::Name,
                "Name can only contain letters and spaces",
            ),
            (
                ContactCandidate::new(VALID_NAME, "jane@example", VALID_MESSAGE),
                ContactField::Email,
                "Please enter a valid email address",
            ),
            (
                ContactCandidate::new(
                    VALID_NAME,
                    format!("{}@example.com", "a".repeat(244)),
                    VALID_MESSAGE,
                ),
                ContactField::Email,
                "Email must be less than 255 characters",
            ),
            (
                ContactCandidate::new(VALID_NAME, VALID_EMAIL, "too short"),
                ContactField::Message,
                "Message must be at least 10 characters",
            ),
            (
                ContactCandidate::new(VALID_NAME, VALID_EMAIL, "x".repeat(1001)),
                ContactField::Message,
                "Message must be less than 1000 characters",
            ),
        ] {
            let errors = validate(&candidate).unwrap_err();
            assert_eq!(
                errors.iter().map(|e| e.field).collect::<Vec<_>>(),
                [field],
                "{candidate:?}"
            );
            assert_eq!(messages(&errors, field), [expected]);
        }
    }

    #[test]
    fn short_name_and_message() {
        // Arrange
        let candidate = ContactCandidate::new("J", VALID_EMAIL, "short");

        // Act
        let errors = validate(&candidate).unwrap_err();

        // Assert
        assert_eq!(
            messages(&errors, ContactField::Name),
            ["Name must be at least 2 characters"]
        );
        assert!(!errors.contains(ContactField::Email));
        assert_eq!(
            messages(&errors, ContactField::Message),
            ["Message must be at least 10 characters"]
        );
    }

    #[test]
    fn bad_name_grammar_and_email() {
        let candidate = ContactCandidate::new("Jane123", "not-an-email", "Valid length message here.");

        let errors = validate(&candidate).unwrap_err();

        assert_eq!(
            messages(&errors, ContactField::Name),
            ["Name can only contain letters and spaces"]
        );
        assert_eq!(
            messages(&errors, ContactField::Email),
            ["Please enter a valid email address"]
        );
        assert!(!errors.contains(ContactField::Message));
    }

    #[test]
    fn reports_every_rule_of_a_field() {
        let errors = validate(&ContactCandidate::new("", VALID_EMAIL, VALID_MESSAGE)).unwrap_err();

        assert_eq!(
            messages(&errors, ContactField::Name),
            [
                "Name must be at least 2 characters",
                "Name can only contain letters and spaces"
            ]
        );
    }

    #[test]
    fn missing_and_wrong_type() {
        let candidate = ContactCandidate::from_json(&json!({"name": null, "message": 12}));

        let errors = validate(&candidate).unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([
                {"field": "name", "message": "Expected string, received null"},
                {"field": "email", "message": "Required"},
                {"field": "message", "message": "Expected string, received number"},
            ])
        );
    }

    #[test]
    fn schema_is_serializable() {
        let schema = serde_json::to_value(FieldSchema::for_field(ContactField::Email)).unwrap();

        assert_eq!(
            schema,
            json!({
                "field": "email",
                "rules": [
                    {"rule": "format", "value": "email"},
                    {"rule": "max_chars", "value": 255},
                ],
            })
        );
    }

    #[test]
    fn schema_order_matches_fields() {
        assert_eq!(
            CONTACT_SCHEMA.map(|schema| schema.field),
            ContactField::ALL
        );
    }
}
