//! Shared Error Types
//!
//! Errors produced while talking to the Synthesis API or while validating
//! user input. Views match on [`ErrorKind`] to decide how a failure is
//! surfaced: inline next to a field, as a toast, or by ending the session.
//!
//! # Error Categories
//!
//! - `Validation` - local input checks, never reaches the network
//! - `Network` - the request never got a response (status 0)
//! - `Auth` - the server answered 401
//! - `Server` - any other non-2xx answer
//! - `Decode` - a 2xx answer whose payload was not what we expected
//!
//! # Usage
//!
//! ```rust
//! use synthesis::shared::error::{ApiError, ErrorKind};
//!
//! let error = ApiError::server(500, "Internal server error");
//! assert_eq!(error.kind(), ErrorKind::Server);
//! ```
use thiserror::Error;

/// Broad classification used by views to route an error to the right surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Auth,
    Server,
    Decode,
}

/// Error returned by the typed API operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never reached the server, or the connection dropped
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// The server rejected the bearer token or the credentials (HTTP 401)
    #[error("{message}")]
    Auth {
        /// Message taken from the response payload
        message: String,
    },

    /// Any other non-2xx response
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message taken from the response payload
        message: String,
    },

    /// The payload did not have the expected shape
    #[error("Unexpected response: {message}")]
    Decode {
        /// Description of what was missing or malformed
        message: String,
    },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Server { .. } => ErrorKind::Server,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status associated with the error; 0 when no response arrived.
    pub fn status(&self) -> u16 {
        match self {
            Self::Network { .. } => 0,
            Self::Auth { .. } => 401,
            Self::Server { status, .. } => *status,
            Self::Decode { .. } => 200,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

/// Local validation failure attached to a single form field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
