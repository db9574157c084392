use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::Router;
use contact_core_submission_contracts::SubmissionService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod extractors;
mod middlewares;
mod models;
pub mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Submission> {
    submission: Submission,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub real_ip_config: Option<Arc<RestServerRealIpConfig>>,
}

/// Trust `header` as the client address when the connection comes from
/// `set_from`, e.g. a reverse proxy.
#[derive(Debug)]
pub struct RestServerRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

impl<Submission> RestServer<Submission>
where
    Submission: SubmissionService,
{
    pub fn new(submission: Submission, config: RestServerConfig) -> Self {
        Self { submission, config }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Listening on http://{addr}");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .context("Failed to start HTTP server")
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(self.submission.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(self.config.real_ip_config)(router);
        middlewares::request_id::add(router)
    }
}
