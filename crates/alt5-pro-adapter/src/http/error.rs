/*
[INPUT]:  Error sources (HTTP transport, login steps, status codes, decoding)
[OUTPUT]: Structured error types with status and body context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Login step that produced an authentication failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// Email/password sign-in
    Signin,
    /// Two-factor code confirmation
    TwoFactor,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginStep::Signin => f.write_str("signin"),
            LoginStep::TwoFactor => f.write_str("2fa"),
        }
    }
}

/// Main error type for the ALT5 adapter
#[derive(Error, Debug)]
pub enum Alt5Error {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Login or 2FA confirmation rejected
    #[error("Authentication failed at {step} (status {status}): {body}")]
    Auth {
        step: LoginStep,
        status: u16,
        body: String,
    },

    /// Server answered with a failing status
    #[error("Request failed (status {status}): {body}")]
    Request { status: u16, body: String },

    /// Method the client does not issue
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Response body could not be decoded into the requested type
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested item missing from an otherwise valid response
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration or misuse error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be signed with the configured key
    #[error("Signing error: {0}")]
    Signature(String),
}

impl Alt5Error {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            Alt5Error::Auth { .. } => true,
            Alt5Error::Request { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Alt5Error::Auth { status, .. } | Alt5Error::Request { status, .. } => Some(*status),
            Alt5Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create a request error from status code and body
    pub fn request_error(status: StatusCode, body: impl Into<String>) -> Self {
        Alt5Error::Request {
            status: status.as_u16(),
            body: body.into(),
        }
    }
}

/// Result type alias for ALT5 operations
pub type Result<T> = std::result::Result<T, Alt5Error>;
