//! Permission scheme service
//!
//! `GET /permissionscheme` is the only lookup; single schemes are found by
//! listing and scanning. The canonical key is the server-assigned id.

use crate::client::JiraClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument, warn};

/// A permission scheme as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionScheme {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSchemeRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct PermissionSchemeList {
    #[serde(rename = "permissionSchemes", default)]
    permission_schemes: Vec<PermissionScheme>,
}

/// Caller-side reference to a permission scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeRef {
    Id(i64),
    Name(String),
}

impl fmt::Display for SchemeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeRef::Id(id) => write!(f, "permission scheme {}", id),
            SchemeRef::Name(name) => write!(f, "permission scheme '{}'", name),
        }
    }
}

impl From<i64> for SchemeRef {
    fn from(id: i64) -> Self {
        SchemeRef::Id(id)
    }
}

impl From<&str> for SchemeRef {
    fn from(name: &str) -> Self {
        SchemeRef::Name(name.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct PermissionSchemeService {
    client: JiraClient,
}

impl PermissionSchemeService {
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PermissionScheme>> {
        let list: PermissionSchemeList = self.client.get_json("permissionscheme", &[]).await?;
        Ok(list.permission_schemes)
    }

    /// Look up a scheme by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<PermissionScheme> {
        let schemes = self.list().await?;
        match schemes.into_iter().find(|s| s.id == id) {
            Some(scheme) => Ok(scheme),
            None => {
                warn!(id, "permission scheme not found");
                Err(Error::not_found(SchemeRef::Id(id)))
            }
        }
    }

    /// Look up a scheme by its exact name
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<PermissionScheme> {
        let schemes = self.list().await?;
        match schemes.into_iter().find(|s| s.name == name) {
            Some(scheme) => Ok(scheme),
            None => {
                warn!(name, "permission scheme not found");
                Err(Error::not_found(SchemeRef::Name(name.to_string())))
            }
        }
    }

    pub async fn resolve(&self, scheme: &SchemeRef) -> Result<PermissionScheme> {
        match scheme {
            SchemeRef::Id(id) => self.get(*id).await,
            SchemeRef::Name(name) => self.find_by_name(name).await,
        }
    }

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create(&self, request: &PermissionSchemeRequest) -> Result<PermissionScheme> {
        let created: PermissionScheme = self.client.post_json("permissionscheme", request).await?;
        info!(id = created.id, name = %created.name, "Created permission scheme");
        Ok(created)
    }

    /// Replace name and description of an existing scheme
    ///
    /// An empty `name` keeps the name currently on the server.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i64,
        request: &PermissionSchemeRequest,
    ) -> Result<PermissionScheme> {
        let current = self.get(id).await?;

        let body = PermissionSchemeRequest {
            name: if request.name.is_empty() {
                current.name
            } else {
                request.name.clone()
            },
            description: request.description.clone(),
        };

        let updated: PermissionScheme = self
            .client
            .put_json(&format!("permissionscheme/{}", current.id), &body)
            .await?;
        info!(id = updated.id, "Updated permission scheme");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let current = self.get(id).await?;
        self.client
            .delete(&format!("permissionscheme/{}", current.id), &[])
            .await?;
        info!(id, "Deleted permission scheme");
        Ok(())
    }
}
