//! Project role service

use crate::client::JiraClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRole {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRoleRequest {
    pub name: String,
    pub description: String,
}

/// Global project roles (`/role`), keyed by id
#[derive(Debug, Clone)]
pub struct ProjectRoleService {
    client: JiraClient,
}

impl ProjectRoleService {
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProjectRole>> {
        self.client.get_json("role", &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ProjectRole> {
        let roles = self.list().await?;
        match roles.into_iter().find(|r| r.id == id) {
            Some(role) => Ok(role),
            None => {
                warn!(id, "project role not found");
                Err(Error::not_found(format!("project role {}", id)))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<ProjectRole> {
        let roles = self.list().await?;
        match roles.into_iter().find(|r| r.name == name) {
            Some(role) => Ok(role),
            None => {
                warn!(name, "project role not found");
                Err(Error::not_found(format!("project role '{}'", name)))
            }
        }
    }

    /// Resolve a grant holder parameter to a role
    ///
    /// The reference is matched against role names first; a numeric reference
    /// that names no role is then tried as a role id.
    #[instrument(skip(self))]
    pub async fn resolve_reference(&self, reference: &str) -> Result<ProjectRole> {
        let roles = self.list().await?;

        if let Some(role) = roles.iter().find(|r| r.name == reference) {
            return Ok(role.clone());
        }

        if let Ok(id) = reference.trim().parse::<i64>() {
            if let Some(role) = roles.into_iter().find(|r| r.id == id) {
                debug!(id, "resolved project role by id");
                return Ok(role);
            }
        }

        warn!(reference, "project role not found");
        Err(Error::not_found(format!("project role '{}'", reference)))
    }

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create(&self, request: &ProjectRoleRequest) -> Result<ProjectRole> {
        let created: ProjectRole = self.client.post_json("role", request).await?;
        info!(id = created.id, name = %created.name, "Created project role");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &ProjectRoleRequest) -> Result<ProjectRole> {
        let current = self.get(id).await?;
        let updated: ProjectRole = self
            .client
            .put_json(&format!("role/{}", current.id), request)
            .await?;
        info!(id = updated.id, "Updated project role");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let current = self.get(id).await?;
        self.client
            .delete(&format!("role/{}", current.id), &[])
            .await?;
        info!(id, "Deleted project role");
        Ok(())
    }
}
