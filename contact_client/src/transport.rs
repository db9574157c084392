use std::future::Future;

use chrono::{DateTime, Utc};
use contact_models::contact::ContactSubmission;
use thiserror::Error;

/// Delivers a validated submission to the submission endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionTransport: Send + Sync + 'static {
    /// Sends the submission and returns the timestamp of the
    /// acknowledgement.
    fn send(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<DateTime<Utc>, TransportError>> + Send;
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status.
    #[error("Failed to send message")]
    Rejected { status: u16 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
