//! Error handling for the customer portal client

use std::fmt;
use thiserror::Error;

use customer_portal_validation::ValidationErrors;

/// Unified error type for the customer portal client
#[derive(Error, Debug)]
pub enum Error {
    /// Form input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Network or transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    /// 409 response from the API
    #[error("Conflict: {}", .message.as_deref().unwrap_or("no message"))]
    Conflict { message: Option<String> },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Whether the API answered with 409
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// The `error` field of the API's response body, if there was one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } | Error::Conflict { message } => message.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status that caused this error, if any
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Conflict { .. } => Some(reqwest::StatusCode::CONFLICT),
            Error::Http(err) => err.status(),
            _ => None,
        }
    }
}
