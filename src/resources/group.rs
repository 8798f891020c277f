//! `jiraserver_group`
//!
//! Groups cannot be renamed; a name change replaces the group.

use super::{finish, require, Resource, Validate};
use crate::config::ValidationResult;
use crate::Result;
use async_trait::async_trait;
use jira_server::{GroupRequest, GroupService};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    pub name: String,
}

impl Validate for GroupConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

pub struct GroupResource {
    service: GroupService,
}

impl GroupResource {
    pub fn new(service: GroupService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for GroupResource {
    type Config = GroupConfig;
    type State = GroupState;

    const TYPE_NAME: &'static str = "jiraserver_group";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let created = self
            .service
            .create(&GroupRequest {
                name: config.name.clone(),
            })
            .await?;
        Ok(GroupState { name: created.name })
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        let found = self.service.get(&state.name).await?;
        Ok(GroupState { name: found.name })
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        if state.name == config.name {
            return self.read(state).await;
        }

        info!(from = %state.name, to = %config.name, "Replacing group");
        self.service.delete(&state.name).await?;
        self.create(config).await
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        Ok(self.service.delete(&state.name).await?)
    }
}
