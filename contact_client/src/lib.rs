//! Client side of the contact form: holds the field values, validates them
//! with the shared contract and drives a submission through
//! `Idle -> Submitting -> Succeeded | Failed -> Idle`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use contact_models::{
    contact::{ContactCandidate, ContactField, ContactSubmission, FieldErrors, FieldInput},
    contract,
};
use contact_shared_contracts::time::TimeService;
use thiserror::Error;
use tracing::{debug, error, warn};

pub use crate::{
    http::{HttpClient, HttpSubmissionTransport},
    transport::{SubmissionTransport, TransportError},
};

mod http;
mod transport;

pub const DEFAULT_REVERT_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct ContactFormConfig {
    /// How long `Succeeded` and `Failed` last before returning to `Idle`.
    pub revert_after: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            revert_after: DEFAULT_REVERT_AFTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded { acknowledged_at: DateTime<Utc> },
    Failed { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn candidate(&self) -> ContactCandidate {
        ContactCandidate::new(
            self.name.as_str(),
            self.email.as_str(),
            self.message.as_str(),
        )
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(FieldErrors),
    #[error("A submission is already in flight.")]
    InFlight,
    #[error("The previous message has not been dismissed yet.")]
    NotReady,
}

#[derive(Debug, Error)]
pub enum FieldEditError {
    #[error("Fields cannot be edited while a submission is in flight.")]
    Busy,
}

pub struct ContactForm<Transport, Time> {
    transport: Transport,
    time: Time,
    config: ContactFormConfig,
    fields: ContactFormFields,
    errors: FieldErrors,
    state: FormState,
    revert_at: Option<DateTime<Utc>>,
}

impl<Transport, Time> ContactForm<Transport, Time>
where
    Transport: SubmissionTransport,
    Time: TimeService,
{
    pub fn new(transport: Transport, time: Time, config: ContactFormConfig) -> Self {
        Self {
            transport,
            time,
            config,
            fields: ContactFormFields::default(),
            errors: FieldErrors::default(),
            state: FormState::Idle,
            revert_at: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &ContactFormFields {
        &self.fields
    }

    /// Inline errors of the last validation, per field.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// When the current `Succeeded` or `Failed` state returns to `Idle`.
    pub fn revert_at(&self) -> Option<DateTime<Utc>> {
        self.revert_at
    }

    /// The submit action is disabled while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn set_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), FieldEditError> {
        if self.is_submitting() {
            return Err(FieldEditError::Busy);
        }

        *self.fields.get_mut(field) = value.into();

        // fields that already show errors are revalidated on every change
        if self.errors.contains(field) {
            self.blur(field);
        }

        Ok(())
    }

    /// Validates a single field after the user leaves it. Returns whether
    /// the field is valid.
    pub fn blur(&mut self, field: ContactField) -> bool {
        let input = FieldInput::Text(self.fields.get(field).to_owned());
        let messages = contract::validate_field(field, &input);
        let valid = messages.is_empty();
        self.errors.replace(field, messages);
        valid
    }

    /// Validates all fields and enters `Submitting`.
    ///
    /// On validation failure the state is left unchanged and the errors are
    /// stored for inline display. A pending error message is dismissed
    /// first, as submitting counts as user action.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitError> {
        self.tick();

        match self.state {
            FormState::Idle => {}
            FormState::Submitting => return Err(SubmitError::InFlight),
            FormState::Succeeded { .. } => return Err(SubmitError::NotReady),
            FormState::Failed { .. } => self.revert(),
        }

        let submission = match contract::validate(&self.fields.candidate()) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(%errors, "contact form is invalid");
                self.errors = errors.clone();
                return Err(SubmitError::Validation(errors));
            }
        };

        self.errors.clear();
        self.state = FormState::Submitting;
        debug!("submitting contact form");

        Ok(submission)
    }

    /// Applies the result of the remote call started by
    /// [`begin_submit`](Self::begin_submit) and schedules the revert.
    pub fn complete(&mut self, outcome: Result<DateTime<Utc>, TransportError>) {
        if !self.is_submitting() {
            warn!(state = ?self.state, "ignoring submission outcome outside of submitting state");
            return;
        }

        self.state = match outcome {
            Ok(acknowledged_at) => {
                debug!(%acknowledged_at, "contact form submission acknowledged");
                self.fields = ContactFormFields::default();
                self.errors.clear();
                FormState::Succeeded { acknowledged_at }
            }
            Err(err) => {
                error!("contact form error: {err}");
                FormState::Failed {
                    message: err.to_string(),
                }
            }
        };
        self.revert_at = Some(self.time.now() + self.config.revert_after);
    }

    /// Validates, sends and completes a submission.
    pub async fn submit(&mut self) -> Result<&FormState, SubmitError> {
        let submission = self.begin_submit()?;
        let outcome = self.transport.send(submission).await;
        self.complete(outcome);
        Ok(&self.state)
    }

    /// Returns to `Idle` if the revert deadline has passed.
    pub fn tick(&mut self) -> bool {
        match self.revert_at {
            Some(revert_at) if self.time.now() >= revert_at => {
                self.revert();
                true
            }
            _ => false,
        }
    }

    /// Sleeps until the revert deadline, then returns to `Idle`.
    pub async fn wait_for_revert(&mut self) {
        let Some(revert_at) = self.revert_at else {
            return;
        };

        if let Ok(remaining) = (revert_at - self.time.now()).to_std() {
            tokio::time::sleep(remaining).await;
        }
        self.revert();
    }

    /// Leaves the success message right away to write another message.
    pub fn compose_another(&mut self) {
        if matches!(self.state, FormState::Succeeded { .. }) {
            self.revert();
        }
    }

    fn revert(&mut self) {
        debug!(from = ?self.state, "contact form back to idle");
        self.state = FormState::Idle;
        self.revert_at = None;
    }
}
