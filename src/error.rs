//! Failure taxonomy of the user data client.
//!
//! Every remote failure is classified into exactly one [`ApiError`] variant at
//! the client boundary, so controllers never look at HTTP details.

use serde::Deserialize;
use thiserror::Error;

/// One entry of the `errors` array in a 4xx body.
///
/// Servers may send free text (`"Email already exists"`) or a structured
/// `{ "field": "email", "message": "..." }` pair.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerFieldError {
    Structured { field: String, message: String },
    Text(String),
}

impl ServerFieldError {
    pub fn message(&self) -> &str {
        match self {
            ServerFieldError::Structured { message, .. } => message,
            ServerFieldError::Text(message) => message,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the payload with field-level problems.
    #[error("validation failed ({} problem(s))", .errors.len())]
    Validation {
        message: Option<String>,
        errors: Vec<ServerFieldError>,
    },

    #[error("user not found")]
    NotFound { message: Option<String> },

    /// Network failure, unexpected status or malformed body. `message` is the
    /// server's own text when it sent one.
    #[error("request failed: {detail}")]
    Request {
        message: Option<String>,
        detail: String,
    },
}

impl ApiError {
    pub fn request(detail: impl Into<String>) -> Self {
        ApiError::Request {
            message: None,
            detail: detail.into(),
        }
    }

    /// Server-supplied text suitable for showing to the user, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Request { message, .. } => message.as_deref(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::request(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
