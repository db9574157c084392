use std::{ops::Deref, sync::Arc, sync::LazyLock};

use anyhow::Context;
use chrono::{DateTime, Utc};
use contact_models::contact::ContactSubmission;
use contact_utils::contact_version;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::transport::{SubmissionTransport, TransportError};

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("Contact Form Client (Version {})", contact_version()));

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .map(Self)
            .context("Failed to build HTTP client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Posts submissions as JSON to the contact endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionTransport {
    client: HttpClient,
    url: Arc<Url>,
}

impl HttpSubmissionTransport {
    pub fn new(url: Url) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            url: url.into(),
        })
    }
}

impl SubmissionTransport for HttpSubmissionTransport {
    async fn send(&self, submission: ContactSubmission) -> Result<DateTime<Utc>, TransportError> {
        let response = self
            .client
            .post((*self.url).clone())
            .json(&submission)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "contact endpoint rejected submission");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        let acknowledgement = response
            .json::<AcknowledgementResponse>()
            .await
            .context("Failed to read acknowledgement")?;

        Ok(acknowledgement.timestamp)
    }
}

#[derive(Deserialize)]
struct AcknowledgementResponse {
    timestamp: DateTime<Utc>,
}
