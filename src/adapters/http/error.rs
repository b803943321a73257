//! HTTP error responses.
//!
//! Converts application failures into the relay's JSON error envelope.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::payment::PaymentError;

/// Failure body for order and payment endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Body returned for unexpected failures.
#[derive(Debug, Clone, Serialize)]
pub struct InternalErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
}

/// Body returned for unknown routes.
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub message: String,
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// `diagnostic` allows upstream failure detail into the response body.
    Payment {
        error: PaymentError,
        diagnostic: bool,
    },
    InvalidBody(String),
}

impl ApiError {
    pub fn payment(error: PaymentError, diagnostic: bool) -> Self {
        Self::Payment { error, diagnostic }
    }
}

impl From<PaymentError> for ApiError {
    fn from(error: PaymentError) -> Self {
        Self::payment(error, false)
    }
}

/// Message shown to the caller. Transport, token and timeout failures carry
/// upstream URLs and OS errors, so they are replaced outside diagnostic mode.
fn client_message(error: &PaymentError, diagnostic: bool) -> String {
    match error {
        PaymentError::Auth(_) | PaymentError::Network(_) | PaymentError::Timeout { .. }
            if !diagnostic =>
        {
            "Payment provider unavailable".to_string()
        }
        _ => error.to_string(),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Payment { error, diagnostic } => {
                let status = error.status_code();
                if status.is_server_error() {
                    tracing::error!(code = error.code(), error = %error, "Provider call failed");
                } else {
                    tracing::warn!(code = error.code(), error = %error, "Request rejected");
                }
                let body = ErrorResponse::new(client_message(&error, diagnostic));
                (status, Json(body)).into_response()
            }
            ApiError::InvalidBody(reason) => {
                tracing::warn!(%reason, "Malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Invalid request body: {}", reason))),
                )
                    .into_response()
            }
        }
    }
}

/// 500 response for failures nothing else handled.
///
/// The cause is only exposed when `diagnostic` is set.
pub fn internal_error(cause: &str, diagnostic: bool) -> Response {
    tracing::error!(%cause, "Unhandled error");
    let message = if diagnostic {
        cause.to_string()
    } else {
        "An error occurred".to_string()
    };
    let body = InternalErrorResponse {
        success: false,
        error: "Internal Server Error",
        message,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Renders a caught handler panic.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, diagnostic: bool) -> Response {
    let cause = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    internal_error(&cause, diagnostic)
}
