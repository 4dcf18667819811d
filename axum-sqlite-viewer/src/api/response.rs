//! Response writers and the API error type
//!
//! Every handler returns `Result<Response, ApiError>`, so each request ends in
//! exactly one body: the success payload or the error envelope.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::database::DatabaseError;
use crate::schema::ErrorEnvelope;

/// Content type of every JSON response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Content type of CSV query output
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Failure of an API request, rendered as the JSON error envelope
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Missing or empty request parameter
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::TableNotFound(_) => Self::not_found(error.to_string()),
            _ => Self::internal(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "request rejected");
        }

        json_response(self.status, &ErrorEnvelope::new(self.message))
    }
}

/// Serialize `payload` as the JSON body of a response
///
/// A payload that fails to serialize yields a plain-text 500 instead.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(error) => {
            tracing::error!(%error, "failed to serialize response");
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
        }
    }
}

/// CSV text as the body of a response
pub fn csv_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, CSV_CONTENT_TYPE)], body).into_response()
}
