use std::time::Duration;

use contact_core_submission_contracts::{SubmissionError, SubmissionOrigin, SubmissionService};
use contact_models::{
    contact::{ContactAcknowledgement, ContactCandidate},
    contract,
};
use contact_shared_contracts::{fault::FaultService, time::TimeService};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct SubmissionServiceImpl<Time, Fault> {
    time: Time,
    fault: Fault,
    config: SubmissionServiceConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct SubmissionServiceConfig {
    /// Simulated downstream work performed for every valid submission.
    pub processing_delay: Duration,
}

impl<Time, Fault> SubmissionServiceImpl<Time, Fault> {
    pub fn new(time: Time, fault: Fault, config: SubmissionServiceConfig) -> Self {
        Self {
            time,
            fault,
            config,
        }
    }
}

impl<Time, Fault> SubmissionService for SubmissionServiceImpl<Time, Fault>
where
    Time: TimeService,
    Fault: FaultService,
{
    async fn submit(
        &self,
        candidate: ContactCandidate,
        origin: SubmissionOrigin,
    ) -> Result<ContactAcknowledgement, SubmissionError> {
        let submission = contract::validate(&candidate).map_err(|errors| {
            debug!(%errors, "rejected contact form submission");
            SubmissionError::Validation(errors)
        })?;

        if !self.config.processing_delay.is_zero() {
            tokio::time::sleep(self.config.processing_delay).await;
        }

        let timestamp = self.time.now();
        info!(
            name = submission.name.as_str(),
            email = submission.email.as_str(),
            message = submission.message.as_str(),
            %timestamp,
            client_ip = ?origin.client_ip,
            user_agent = origin.user_agent.as_deref().unwrap_or("unknown"),
            "contact form submission",
        );

        if self.fault.should_fail() {
            error!("simulated server error");
            return Err(SubmissionError::Fault);
        }

        Ok(ContactAcknowledgement { timestamp })
    }
}
