//! Error types for the Jira Server client

use thiserror::Error;

/// Errors returned by the Jira Server services
#[derive(Error, Debug)]
pub enum Error {
    /// Request construction, network or timeout failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{method} {path} failed: HTTP {status}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// The server rejected the credentials
    #[error("Jira authentication failed: {0}")]
    Auth(String),

    /// The response body was not the JSON we expected
    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A list succeeded but contained no matching entity
    #[error("{0}")]
    NotFound(String),

    /// Caller supplied an unusable value
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for Jira Server operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn not_found(what: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("{} not found", what))
    }

    /// True when the entity (or grant) could not be located after listing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for network-level failures and non-success HTTP statuses
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Status { .. } | Error::Auth(_)
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
