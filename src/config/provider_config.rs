//! Provider configuration file handling

use super::validation::validate_config_result;
use crate::{ProviderError, Result};
use jira_server::{AuthScheme, ServerConnection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_DOMAIN: &str = "JIRA_SERVER_DOMAIN";
pub const ENV_AUTH_METHOD: &str = "JIRA_SERVER_AUTH_METHOD";
pub const ENV_TOKEN: &str = "JIRA_SERVER_TOKEN";

fn default_auth_method() -> String {
    "Bearer".to_string()
}

/// Connection settings for the provider
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Jira Server host, e.g. `jira.example.com`
    #[serde(default)]
    pub domain: String,

    /// `Basic` or `Bearer`
    #[serde(default = "default_auth_method")]
    pub authorization_method: String,

    /// Inline credential token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Name of an environment variable holding the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("domain", &self.domain)
            .field("authorization_method", &self.authorization_method)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("token_env", &self.token_env)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(domain: impl Into<String>, authorization_method: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            authorization_method: authorization_method.into(),
            token: None,
            token_env: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_token_env(mut self, var: impl Into<String>) -> Self {
        self.token_env = Some(var.into());
        self
    }

    /// `~/.config/jiraserver/provider.yaml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("jiraserver");
        path.push("provider.yaml");
        path
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ProviderError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading provider configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(domain = %config.domain, "Configuration loaded");
        Ok(config)
    }

    /// Load from `path` if given, else from the default path if it exists,
    /// else start empty; environment overrides apply in every case.
    pub fn load_or_env(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load(default)?
                } else {
                    Self::new("", default_auth_method())
                }
            }
        };
        Ok(config.apply_env_overrides())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving provider configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(domain) = lookup(ENV_DOMAIN).filter(|v| !v.is_empty()) {
            self.domain = domain;
        }
        if let Some(method) = lookup(ENV_AUTH_METHOD).filter(|v| !v.is_empty()) {
            self.authorization_method = method;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Inline token, or the value of `token_env`
    pub fn resolve_token(&self) -> Option<String> {
        self.resolve_token_with(|key| std::env::var(key).ok())
    }

    pub fn resolve_token_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = self.token.as_ref().filter(|t| !t.is_empty()) {
            return Some(token.clone());
        }
        self.token_env
            .as_ref()
            .and_then(|var| lookup(var.trim_start_matches('$')))
            .filter(|t| !t.is_empty())
    }

    /// Validate and build the connection context
    pub fn connection(&self) -> Result<ServerConnection> {
        validate_config_result(self)?;

        let scheme: AuthScheme = self.authorization_method.parse()?;
        let token = self.resolve_token().ok_or_else(|| {
            ProviderError::Config("no token configured".to_string())
        })?;

        Ok(ServerConnection::new(self.domain.clone(), scheme, token)?)
    }
}
