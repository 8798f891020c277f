//! Error types for the provider
//!
//! Wraps the Jira client errors together with the configuration, state and
//! validation failures that happen before any HTTP call is made.

use crate::config::ValidationError;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource configuration rejected before reaching the server
    #[error("Validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// Errors from the Jira Server services
    #[error(transparent)]
    Jira(#[from] jira_server::Error),

    /// No resource registered under this type name
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// Remote state no longer agrees with the stored state
    #[error("Inconsistent state: {0}")]
    Inconsistent(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON state serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProviderError {
    /// True when the remote object is gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Jira(e) if e.is_not_found())
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
