//! Wires the concrete service implementations together.

use std::{sync::Arc, time::Duration};

use contact_api_rest::{RestServerConfig, RestServerRealIpConfig};
use contact_client::{ContactFormConfig, HttpSubmissionTransport};
use contact_config::Config;
use contact_core_submission_impl::{SubmissionServiceConfig, SubmissionServiceImpl};
use contact_shared_impl::{
    fault::{FaultServiceConfig, FaultServiceImpl},
    time::TimeServiceImpl,
};
use url::Url;

pub type SubmissionService = SubmissionServiceImpl<TimeServiceImpl, FaultServiceImpl>;
pub type RestServer = contact_api_rest::RestServer<SubmissionService>;
pub type ContactForm = contact_client::ContactForm<HttpSubmissionTransport, TimeServiceImpl>;

pub fn submission_service(config: &Config) -> SubmissionService {
    let fault_config = match &config.contact.fault_injection {
        Some(fault_injection) => FaultServiceConfig::Enabled {
            probability: fault_injection.probability,
        },
        None => FaultServiceConfig::Disabled,
    };

    SubmissionServiceImpl::new(
        TimeServiceImpl,
        FaultServiceImpl::new(fault_config),
        SubmissionServiceConfig {
            processing_delay: config.contact.processing_delay.into(),
        },
    )
}

pub fn rest_server(config: &Config) -> RestServer {
    let rest_server_config = RestServerConfig {
        addr: config.http.address,
        real_ip_config: config.http.real_ip.as_ref().map(|real_ip_config| {
            Arc::new(RestServerRealIpConfig {
                header: real_ip_config.header.clone(),
                set_from: real_ip_config.set_from,
            })
        }),
    };

    RestServer::new(submission_service(config), rest_server_config)
}

pub fn contact_form(url: Url, revert_after: Duration) -> anyhow::Result<ContactForm> {
    Ok(ContactForm::new(
        HttpSubmissionTransport::new(url)?,
        TimeServiceImpl,
        ContactFormConfig { revert_after },
    ))
}
