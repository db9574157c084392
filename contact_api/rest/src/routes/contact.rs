use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use contact_core_submission_contracts::{SubmissionError, SubmissionOrigin, SubmissionService};
use contact_models::contact::ContactCandidate;
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::{internal_server_error, method_not_allowed, validation_failed},
    extractors::user_agent::UserAgent,
    middlewares::client_ip::ClientIp,
    models::contact::ApiContactAcknowledgement,
};

pub const CONTACT_ROUTE: &str = "/contact";

pub fn router(service: Arc<impl SubmissionService>) -> Router<()> {
    Router::new()
        .route(
            CONTACT_ROUTE,
            routing::post(submit).fallback(|| async { method_not_allowed() }),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl SubmissionService>>,
    client_ip: Option<Extension<ClientIp>>,
    UserAgent(user_agent): UserAgent,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // an unreadable body counts as a submission with every field missing
    let body = body
        .map_err(|err| err.body_text())
        .and_then(|body| serde_json::from_slice(&body).map_err(|err| err.to_string()))
        .unwrap_or_else(|err| {
            debug!("failed to read contact form body: {err}");
            Value::Null
        });

    let origin = SubmissionOrigin {
        client_ip: client_ip.and_then(|Extension(ClientIp(ip))| ip),
        user_agent,
    };

    match service
        .submit(ContactCandidate::from_json(&body), origin)
        .await
    {
        Ok(acknowledgement) => {
            Json(ApiContactAcknowledgement::from(acknowledgement)).into_response()
        }
        Err(SubmissionError::Validation(errors)) => validation_failed(errors),
        Err(err @ SubmissionError::Fault) => internal_server_error(err),
        Err(SubmissionError::Other(err)) => internal_server_error(err),
    }
}
