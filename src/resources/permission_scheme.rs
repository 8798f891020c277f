//! `jiraserver_permission_scheme`

use super::{finish, require, Resource, Validate};
use crate::config::ValidationResult;
use crate::Result;
use async_trait::async_trait;
use jira_server::{PermissionScheme, PermissionSchemeRequest, PermissionSchemeService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSchemeConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSchemeState {
    pub permission_scheme_id: i64,
    pub name: String,
    pub description: String,
}

impl Validate for PermissionSchemeConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

impl From<&PermissionSchemeConfig> for PermissionSchemeRequest {
    fn from(config: &PermissionSchemeConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
        }
    }
}

impl From<PermissionScheme> for PermissionSchemeState {
    fn from(scheme: PermissionScheme) -> Self {
        Self {
            permission_scheme_id: scheme.id,
            name: scheme.name,
            description: scheme.description,
        }
    }
}

pub struct PermissionSchemeResource {
    service: PermissionSchemeService,
}

impl PermissionSchemeResource {
    pub fn new(service: PermissionSchemeService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for PermissionSchemeResource {
    type Config = PermissionSchemeConfig;
    type State = PermissionSchemeState;

    const TYPE_NAME: &'static str = "jiraserver_permission_scheme";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let created = self.service.create(&config.into()).await?;
        Ok(created.into())
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        let found = self.service.get(state.permission_scheme_id).await?;
        Ok(found.into())
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let updated = self
            .service
            .update(state.permission_scheme_id, &config.into())
            .await?;
        Ok(updated.into())
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        self.service.delete(state.permission_scheme_id).await?;
        Ok(())
    }
}
