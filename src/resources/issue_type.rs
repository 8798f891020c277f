//! `jiraserver_issue_type`

use super::{finish, require, Resource, Validate};
use crate::config::{ValidationError, ValidationResult};
use crate::Result;
use async_trait::async_trait;
use jira_server::{IssueType, IssueTypeRequest, IssueTypeService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeState {
    pub issue_type_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<i64>,
}

impl Validate for IssueTypeConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        if let Some(avatar_id) = self.avatar_id {
            if avatar_id <= 0 {
                errors.push(ValidationError::new("avatar_id", "must be positive"));
            }
        }
        finish(errors)
    }
}

impl From<&IssueTypeConfig> for IssueTypeRequest {
    fn from(config: &IssueTypeConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            avatar_id: config.avatar_id,
        }
    }
}

impl From<IssueType> for IssueTypeState {
    fn from(issue_type: IssueType) -> Self {
        Self {
            issue_type_id: issue_type.id,
            name: issue_type.name,
            description: issue_type.description,
            avatar_id: issue_type.avatar_id,
        }
    }
}

pub struct IssueTypeResource {
    service: IssueTypeService,
}

impl IssueTypeResource {
    pub fn new(service: IssueTypeService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for IssueTypeResource {
    type Config = IssueTypeConfig;
    type State = IssueTypeState;

    const TYPE_NAME: &'static str = "jiraserver_issue_type";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let created = self.service.create(&config.into()).await?;

        // The create response still carries the default avatar
        let mut state = IssueTypeState::from(created);
        if config.avatar_id.is_some() {
            state.avatar_id = config.avatar_id;
        }
        Ok(state)
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        Ok(self.service.get(&state.issue_type_id).await?.into())
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        Ok(self
            .service
            .update(&state.issue_type_id, &config.into())
            .await?
            .into())
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        Ok(self.service.delete(&state.issue_type_id).await?)
    }
}
