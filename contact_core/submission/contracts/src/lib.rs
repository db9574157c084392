use std::{future::Future, net::IpAddr};

use contact_models::contact::{ContactAcknowledgement, ContactCandidate, FieldErrors};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionService: Send + Sync + 'static {
    /// Validates and processes a contact form submission.
    fn submit(
        &self,
        candidate: ContactCandidate,
        origin: SubmissionOrigin,
    ) -> impl Future<Output = Result<ContactAcknowledgement, SubmissionError>> + Send;
}

/// Where a submission came from, recorded for logging only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOrigin {
    pub client_ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(FieldErrors),
    #[error("Simulated server error.")]
    Fault,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionService {
    pub fn with_submit(
        mut self,
        candidate: ContactCandidate,
        result: Result<ContactAcknowledgement, SubmissionError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(candidate),
                mockall::predicate::always(),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
