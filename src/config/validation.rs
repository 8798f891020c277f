//! Configuration validation
//!
//! Collects every problem at once instead of stopping at the first:
//! - domain is set
//! - authorization method is Basic or Bearer
//! - a token is available inline or through `token_env`

use super::provider_config::ProviderConfig;
use crate::ProviderError;
use jira_server::AuthScheme;

/// Validation error details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a provider configuration
pub fn validate_config(config: &ProviderConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.domain.trim().is_empty() {
        errors.push(ValidationError::new("domain", "Domain must not be empty"));
    } else if config.domain.contains(char::is_whitespace) {
        errors.push(ValidationError::new(
            "domain",
            format!("Invalid domain '{}'", config.domain),
        ));
    }

    if config.authorization_method.parse::<AuthScheme>().is_err() {
        errors.push(ValidationError::new(
            "authorization_method",
            format!(
                "Invalid authorization method '{}'. Must be one of: Basic, Bearer",
                config.authorization_method
            ),
        ));
    }

    if config.resolve_token().is_none() {
        let message = match config.token_env {
            Some(ref var) => format!("Token environment variable {} is not set", var),
            None => "A token or token_env must be provided".to_string(),
        };
        errors.push(ValidationError::new("token", message));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert to a provider error
pub fn validate_config_result(config: &ProviderConfig) -> crate::Result<()> {
    validate_config(config).map_err(ProviderError::Validation)
}
