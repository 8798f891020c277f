//! Provider configuration
//!
//! Loads the connection settings for one Jira Server instance from
//! `~/.config/jiraserver/provider.yaml`, with environment overrides:
//! - `JIRA_SERVER_DOMAIN`
//! - `JIRA_SERVER_AUTH_METHOD` (Basic or Bearer)
//! - `JIRA_SERVER_TOKEN`

mod provider_config;
pub mod validation;

pub use provider_config::{ProviderConfig, ENV_AUTH_METHOD, ENV_DOMAIN, ENV_TOKEN};
pub use validation::{validate_config, validate_config_result, ValidationError, ValidationResult};
