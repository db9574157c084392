use contact_config::Config;
use tracing::{info, warn};

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    if let Some(fault_injection) = &config.contact.fault_injection {
        warn!(
            probability = fault_injection.probability,
            "Fault injection is enabled, valid submissions will fail at random"
        );
    }

    let server = environment::rest_server(&config);
    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
