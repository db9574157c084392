use std::fmt;

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{is_email_address, CONTACT_NAME_REGEX};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// A well-formed contact form submission.
///
/// Instances can only be obtained through [`crate::contract::validate`] or
/// the validating constructors of the field types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessageText,
}

#[nutype(
    validate(
        len_char_min = NAME_MIN_CHARS,
        len_char_max = NAME_MAX_CHARS,
        regex = CONTACT_NAME_REGEX,
    ),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_max = EMAIL_MAX_CHARS, predicate = |email| is_email_address(email)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(len_char_min = MESSAGE_MIN_CHARS, len_char_max = MESSAGE_MAX_CHARS),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageText(String);

/// Receipt for an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactAcknowledgement {
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Human readable name used at the start of error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw value of a single field before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldInput {
    #[default]
    Missing,
    Text(String),
    /// A value that is present but not a string, with the name of its JSON
    /// type.
    WrongType(&'static str),
}

impl FieldInput {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Null) => Self::WrongType("null"),
            Some(Value::Bool(_)) => Self::WrongType("boolean"),
            Some(Value::Number(_)) => Self::WrongType("number"),
            Some(Value::Array(_)) => Self::WrongType("array"),
            Some(Value::Object(_)) => Self::WrongType("object"),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Missing | Self::WrongType(_) => None,
        }
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

/// An untyped submission as entered by a user or received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCandidate {
    pub name: FieldInput,
    pub email: FieldInput,
    pub message: FieldInput,
}

impl ContactCandidate {
    pub fn new(
        name: impl Into<FieldInput>,
        email: impl Into<FieldInput>,
        message: impl Into<FieldInput>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Reads a candidate from an arbitrary JSON value. Anything other than
    /// an object yields a candidate with every field missing.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(object) = value else {
            return Self::default();
        };

        Self {
            name: FieldInput::from_json(object.get(ContactField::Name.as_str())),
            email: FieldInput::from_json(object.get(ContactField::Email.as_str())),
            message: FieldInput::from_json(object.get(ContactField::Message.as_str())),
        }
    }

    pub fn get(&self, field: ContactField) -> &FieldInput {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }
}

impl<'de> Deserialize<'de> for ContactCandidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

impl From<ContactSubmission> for ContactCandidate {
    fn from(value: ContactSubmission) -> Self {
        Self {
            name: value.name.into_inner().into(),
            email: value.email.into_inner().into(),
            message: value.message.into_inner().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

/// All violations found in a candidate, ordered by field and then by rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the messages recorded for `field`.
    pub fn messages(&self, field: ContactField) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.messages(field).next().is_some()
    }

    /// Replaces all messages of `field` with `messages`, keeping the field
    /// order stable.
    pub fn replace(&mut self, field: ContactField, messages: Vec<String>) {
        self.0.retain(|error| error.field != field);
        let at = self
            .0
            .iter()
            .position(|error| error.field > field)
            .unwrap_or(self.0.len());
        self.0.splice(
            at..at,
            messages
                .into_iter()
                .map(|message| FieldError { field, message }),
        );
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed")?;
        for (i, FieldError { field, message }) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{sep}{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
