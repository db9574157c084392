use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_models::contact::FieldErrors;
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const TRY_AGAIN_LATER: &str = "Please try again later";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const VALIDATION_FAILED: &str = "Validation failed";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError {
            error: INTERNAL_SERVER_ERROR,
            message: Some(TRY_AGAIN_LATER),
        },
    )
}

pub fn method_not_allowed() -> Response {
    error(
        StatusCode::METHOD_NOT_ALLOWED,
        ApiError {
            error: METHOD_NOT_ALLOWED,
            message: None,
        },
    )
}

pub fn validation_failed(details: FieldErrors) -> Response {
    error(
        StatusCode::BAD_REQUEST,
        ApiValidationError {
            error: VALIDATION_FAILED,
            details,
        },
    )
}

pub fn error(code: StatusCode, body: impl Serialize) -> Response {
    (code, Json(body)).into_response()
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct ApiValidationError {
    pub error: &'static str,
    pub details: FieldErrors,
}
