//! `jiraserver_screen`

use super::{finish, require, Resource, Validate};
use crate::config::ValidationResult;
use crate::Result;
use async_trait::async_trait;
use jira_server::{Screen, ScreenRequest, ScreenService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenState {
    pub screen_id: i64,
    pub name: String,
    pub description: String,
}

impl Validate for ScreenConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

impl From<&ScreenConfig> for ScreenRequest {
    fn from(config: &ScreenConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
        }
    }
}

impl From<Screen> for ScreenState {
    fn from(screen: Screen) -> Self {
        Self {
            screen_id: screen.id,
            name: screen.name,
            description: screen.description,
        }
    }
}

pub struct ScreenResource {
    service: ScreenService,
}

impl ScreenResource {
    pub fn new(service: ScreenService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for ScreenResource {
    type Config = ScreenConfig;
    type State = ScreenState;

    const TYPE_NAME: &'static str = "jiraserver_screen";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        Ok(self.service.create(&config.into()).await?.into())
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        Ok(self.service.get(state.screen_id).await?.into())
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        Ok(self.service.update(state.screen_id, &config.into()).await?.into())
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        Ok(self.service.delete(state.screen_id).await?)
    }
}
