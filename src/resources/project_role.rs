//! `jiraserver_project_role`

use super::{finish, require, Resource, Validate};
use crate::config::ValidationResult;
use crate::Result;
use async_trait::async_trait;
use jira_server::{ProjectRole, ProjectRoleRequest, ProjectRoleService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRoleConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRoleState {
    pub role_id: i64,
    pub name: String,
    pub description: String,
}

impl Validate for ProjectRoleConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

impl From<&ProjectRoleConfig> for ProjectRoleRequest {
    fn from(config: &ProjectRoleConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
        }
    }
}

impl From<ProjectRole> for ProjectRoleState {
    fn from(role: ProjectRole) -> Self {
        Self {
            role_id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

pub struct ProjectRoleResource {
    service: ProjectRoleService,
}

impl ProjectRoleResource {
    pub fn new(service: ProjectRoleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for ProjectRoleResource {
    type Config = ProjectRoleConfig;
    type State = ProjectRoleState;

    const TYPE_NAME: &'static str = "jiraserver_project_role";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        Ok(self.service.create(&config.into()).await?.into())
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        Ok(self.service.get(state.role_id).await?.into())
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        Ok(self.service.update(state.role_id, &config.into()).await?.into())
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        Ok(self.service.delete(state.role_id).await?)
    }
}
