//! Server connection context
//!
//! Holds the target domain and credentials. Built once when the provider is
//! configured and cloned into every service.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Scheme used in the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    Basic,
    Bearer,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Basic => "Basic",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(AuthScheme::Basic),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(Error::Validation(format!(
                "unknown authorization method '{}', expected Basic or Bearer",
                other
            ))),
        }
    }
}

/// Immutable connection details for one Jira Server instance
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConnection {
    domain: String,
    auth_scheme: AuthScheme,
    token: String,
}

impl ServerConnection {
    /// Create a connection context
    ///
    /// `domain` is a bare host (`jira.example.com`) or a full origin
    /// (`http://127.0.0.1:8080`).
    pub fn new(
        domain: impl Into<String>,
        auth_scheme: AuthScheme,
        token: impl Into<String>,
    ) -> Result<Self> {
        let domain = domain.into();
        let token = token.into();

        if domain.trim().is_empty() {
            return Err(Error::Validation("domain must not be empty".to_string()));
        }
        if token.is_empty() {
            return Err(Error::Validation("token must not be empty".to_string()));
        }

        Ok(Self {
            domain: domain.trim().to_string(),
            auth_scheme,
            token,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.auth_scheme, self.token)
    }

    /// Root of the REST API, without a trailing slash
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("https://") || domain.starts_with("http://") {
            format!("{}/rest/api/2", domain)
        } else {
            format!("https://{}/rest/api/2", domain)
        }
    }
}

impl fmt::Debug for ServerConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConnection")
            .field("domain", &self.domain)
            .field("auth_scheme", &self.auth_scheme)
            .field("token", &"<redacted>")
            .finish()
    }
}
