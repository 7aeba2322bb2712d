//! Error types for FleetDeck

use std::{error::Error as StdError, fmt};

/// Main error type for FleetDeck
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Transport-level failure (connection refused, timeout, DNS)
    Unreachable(String),

    /// HTTP error response from the backend
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body, or the status reason
        message: String,
    },

    /// Authentication rejected by the backend (401)
    Authentication(String),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Unreachable(msg) => write!(f, "Backend unreachable: {msg}"),
            Self::Api { status, message } => write!(f, "Backend error {status}: {message}"),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl Error {
    /// Whether this error is an authentication rejection.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// The user-facing notice text for this error.
    ///
    /// Backend-provided messages are passed through verbatim; transport
    /// failures collapse to a generic "unreachable" notice.
    #[must_use]
    pub fn notice_text(&self) -> String {
        match self {
            Self::Unreachable(_) => "The server could not be reached. Please try again.".to_string(),
            Self::Api { message, .. } | Self::Authentication(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
