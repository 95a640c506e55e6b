//! Error types for the CloudThing API client.
//!
//! Every fallible operation in this crate returns [`Result`]. Nothing here
//! prints, panics or retries; classification helpers let the caller decide.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for CloudThing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all CloudThing API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An operation was attempted without a valid session.
    ///
    /// Raised locally before any network call is made.
    #[error("Authentication required")]
    NotAuthenticated,

    /// Credential exchange or token probe was rejected by the API.
    #[error("Authentication failed: status={status}, message={message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// HTTP request failed (DNS, connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a status code other than the expected one
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Token claims or an embedded resource could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::NotAuthenticated | Error::Authentication { .. } => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } | Error::Authentication { status, .. } => {
                (400..500).contains(status)
            }
            Error::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } | Error::Authentication { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status carried by an [`Error::Api`] or
    /// [`Error::Authentication`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Authentication { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an API error from a response status and its (possibly empty) body.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        Error::Api {
            status,
            message: message_of(&body),
            body,
        }
    }

    /// Create an authentication error from a rejected exchange or probe.
    pub(crate) fn from_auth_response(status: u16, body: &Value) -> Self {
        Error::Authentication {
            status,
            message: message_of(body),
        }
    }
}

fn message_of(body: &Value) -> String {
    body.get("message")
        .or_else(|| body.get("error").and_then(|e| e.get("message")))
        .and_then(|m| m.as_str())
        .or_else(|| body.get("error").and_then(|e| e.as_str()))
        .unwrap_or("Unexpected status code")
        .to_string()
}
