//! Custom error types for moneylover-cli
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// Server code returned when the stored device token is no longer accepted
const SESSION_EXPIRED_CODE: &str = "717";

/// Server message returned when the stored device token is no longer accepted
const SESSION_EXPIRED_MESSAGE: &str = "token_device_not_found";

/// A step of the authentication flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    /// Anonymous request for a login URL and request token
    LoginUrl,
    /// Credential exchange for an access/refresh token pair
    Token,
    /// Renewal of the access token
    Refresh,
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoginUrl => write!(f, "login.url"),
            Self::Token => write!(f, "login.token"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// The main error type for moneylover-cli operations
#[derive(Error, Debug)]
pub enum MoneyLoverError {
    /// The HTTP exchange itself failed
    #[error("Transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    /// The response body was not the JSON shape we expected
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Login or refresh rejected by the server
    #[error("Authentication failed at {step}: {code}: {message}")]
    Auth {
        step: AuthStep,
        code: String,
        message: String,
    },

    /// A non-authentication failure while performing a login step
    #[error("Login failed at {step}: {source}")]
    Login {
        step: AuthStep,
        #[source]
        source: Box<MoneyLoverError>,
    },

    /// Domain call rejected through the response envelope
    #[error("{operation} failed: Error {code}, {message}")]
    Api {
        operation: &'static str,
        code: String,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Credential storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing command output failed
    #[error("Export error: {0}")]
    Export(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// No stored credentials
    #[error("Not logged in. Run 'moneylover login --email <EMAIL>' first.")]
    NotLoggedIn,

    /// A domain call was made before the session obtained an access token
    #[error("Session has no access token; refresh it first")]
    MissingAccessToken,
}

impl MoneyLoverError {
    /// Attach a login step to an error raised while performing that step
    ///
    /// Server rejections already carry their step and pass through unchanged.
    pub fn during(self, step: AuthStep) -> Self {
        match self {
            err @ (Self::Auth { .. } | Self::Login { .. }) => err,
            other => Self::Login {
                step,
                source: Box::new(other),
            },
        }
    }

    /// Check if the server no longer accepts the stored credentials
    pub fn is_session_expired(&self) -> bool {
        match self {
            Self::Api { code, message, .. } | Self::Auth { code, message, .. } => {
                code == SESSION_EXPIRED_CODE || message == SESSION_EXPIRED_MESSAGE
            }
            _ => false,
        }
    }

    /// Check if the server rejected a login or refresh
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if the HTTP exchange failed, looking through login steps
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Login { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// A follow-up suggestion for the user, if one applies
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_session_expired() {
            Some("Your session has expired. Run 'moneylover login --email <EMAIL>' again.")
        } else if self.is_transport() {
            Some("Check your network connection, or run with --verbose for details.")
        } else if self.is_auth() {
            Some(
                "Check your email and password, then run 'moneylover login --email <EMAIL>' again.",
            )
        } else {
            None
        }
    }

    /// The login or refresh step this error came from, if any
    pub fn auth_step(&self) -> Option<AuthStep> {
        match self {
            Self::Auth { step, .. } | Self::Login { step, .. } => Some(*step),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MoneyLoverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MoneyLoverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for MoneyLoverError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for moneylover-cli operations
pub type MoneyLoverResult<T> = Result<T, MoneyLoverError>;
