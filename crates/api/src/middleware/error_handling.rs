//! # Error Handling Middleware
//!
//! Maps booking errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tablebook_core::errors::BookingError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `BookingError` and implements `IntoResponse`, so handlers
/// can use `?` on store and controller calls. The body is the error's own
/// text unless a guest-facing message was attached.
#[derive(Debug)]
pub struct AppError {
    pub error: BookingError,
    message: Option<String>,
}

impl AppError {
    /// Keeps `error` for the status code and logs, but answers with `message`.
    pub fn with_message(error: BookingError, message: impl Into<String>) -> Self {
        Self {
            error,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::NoTableAvailable { .. } => StatusCode::CONFLICT,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self.error, "request failed");
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(error: BookingError) -> Self {
        Self {
            error,
            message: None,
        }
    }
}

/// Wraps adapter-level reports as storage failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        BookingError::Storage(err).into()
    }
}

/// Unreadable request bodies are validation failures with the usual JSON body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        BookingError::Validation(rejection.body_text()).into()
    }
}
