//! Boundary error type for the HTTP API.
//!
//! Domain reports are converted by their [`ErrorKind`], so every rejection
//! reaches the client as a specific status with a `{"error": "..."}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parley_conversation::{LedgerError, ResolveError};
use parley_core::ErrorKind;
use rootcause::prelude::Report;
use serde_json::json;
use std::fmt;

/// Errors returned by API handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A required query parameter or body field is absent.
    MissingParameter { name: &'static str },
    /// A parameter is present but cannot be parsed.
    InvalidParameter { name: &'static str, value: String },
    /// The query string cannot be decoded.
    InvalidQuery { details: String },
    /// The request body is not the expected JSON document.
    InvalidBody { details: String },
    /// A domain rule rejected the request.
    InvalidArgument { message: String },
    /// A referenced user or conversation does not exist.
    NotFound { message: String },
    /// The requester may not touch the target conversation.
    Forbidden,
    /// The store violated its own integrity.
    Internal { details: String },
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidQuery { .. }
            | Self::InvalidBody { .. }
            | Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::InvalidArgument => Self::InvalidArgument { message },
            ErrorKind::NotFound => Self::NotFound { message },
            ErrorKind::Forbidden => Self::Forbidden,
        }
    }

    /// Message sent to the client.
    fn client_message(&self) -> String {
        match self {
            Self::MissingParameter { name } => format!("{name} is required"),
            Self::InvalidParameter { name, .. } => format!("Invalid {name} format"),
            Self::InvalidQuery { .. } => "Invalid query string".to_string(),
            Self::InvalidBody { .. } => "Invalid request body".to_string(),
            Self::InvalidArgument { message } | Self::NotFound { message } => message.clone(),
            Self::Forbidden => "Forbidden: you are not in this conversation".to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter { name } => write!(f, "missing parameter '{name}'"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter '{name}': '{value}'")
            }
            Self::InvalidQuery { details } => write!(f, "invalid query string: {details}"),
            Self::InvalidBody { details } => write!(f, "invalid request body: {details}"),
            Self::InvalidArgument { message } => write!(f, "invalid argument: {message}"),
            Self::NotFound { message } => write!(f, "not found: {message}"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::Internal { details } => write!(f, "internal error: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Report<ResolveError>> for ApiError {
    fn from(report: Report<ResolveError>) -> Self {
        let error = report.current_context();
        let message = match error {
            ResolveError::SelfConversation { .. } => {
                "cannot start conversation with yourself".to_string()
            }
            ResolveError::UserNotFound { .. } => "participant not found".to_string(),
        };
        Self::from_kind(error.kind(), message)
    }
}

impl From<Report<LedgerError>> for ApiError {
    fn from(report: Report<LedgerError>) -> Self {
        let error = report.current_context();
        let message = match error {
            LedgerError::EmptyContent { .. } => "content is required".to_string(),
            LedgerError::Forbidden { .. } => error.to_string(),
        };
        Self::from_kind(error.kind(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
