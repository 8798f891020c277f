//! Resource adapters
//!
//! Each adapter maps a typed resource configuration onto the Jira services
//! and returns the state to persist. Configuration is validated here, before
//! any request leaves the process.
//!
//! # Lifecycle
//!
//! - `create(config)` → new state
//! - `read(state)` → refreshed state
//! - `update(state, config)` → new state
//! - `delete(state)`
//!
//! A failed operation returns an error and never a partial state; callers keep
//! their prior state untouched.

pub mod grant;
pub mod group;
pub mod issue_type;
pub mod permission_scheme;
pub mod project_role;
pub mod screen;

pub use grant::{GrantConfig, GrantResource, GrantState};
pub use group::{GroupConfig, GroupResource, GroupState};
pub use issue_type::{IssueTypeConfig, IssueTypeResource, IssueTypeState};
pub use permission_scheme::{
    PermissionSchemeConfig, PermissionSchemeResource, PermissionSchemeState,
};
pub use project_role::{ProjectRoleConfig, ProjectRoleResource, ProjectRoleState};
pub use screen::{ScreenConfig, ScreenResource, ScreenState};

use crate::config::{ValidationError, ValidationResult};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Checks run on a resource configuration before it reaches the services
pub trait Validate {
    fn validate(&self) -> ValidationResult;

    fn check(&self) -> Result<()> {
        self.validate().map_err(ProviderError::Validation)
    }
}

/// Push an error when a required string is blank
pub(crate) fn require(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    }
}

pub(crate) fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A declarative resource backed by Jira Server
#[async_trait]
pub trait Resource: Send + Sync {
    type Config: Validate + DeserializeOwned + Send + Sync;
    type State: Serialize + DeserializeOwned + Send + Sync;

    /// Resource type name, e.g. `jiraserver_group`
    const TYPE_NAME: &'static str;

    async fn create(&self, config: &Self::Config) -> Result<Self::State>;

    async fn read(&self, state: &Self::State) -> Result<Self::State>;

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State>;

    async fn delete(&self, state: &Self::State) -> Result<()>;
}

/// Object-safe view of a [`Resource`] over JSON values
///
/// Lets a protocol host or the CLI drive any registered resource by name.
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn create_json(&self, config: Value) -> Result<Value>;

    async fn read_json(&self, state: Value) -> Result<Value>;

    async fn update_json(&self, state: Value, config: Value) -> Result<Value>;

    async fn delete_json(&self, state: Value) -> Result<()>;
}

#[async_trait]
impl<R: Resource> DynResource for R {
    fn type_name(&self) -> &'static str {
        R::TYPE_NAME
    }

    async fn create_json(&self, config: Value) -> Result<Value> {
        let config: R::Config = serde_json::from_value(config)?;
        let state = self.create(&config).await?;
        Ok(serde_json::to_value(state)?)
    }

    async fn read_json(&self, state: Value) -> Result<Value> {
        let state: R::State = serde_json::from_value(state)?;
        let state = self.read(&state).await?;
        Ok(serde_json::to_value(state)?)
    }

    async fn update_json(&self, state: Value, config: Value) -> Result<Value> {
        let state: R::State = serde_json::from_value(state)?;
        let config: R::Config = serde_json::from_value(config)?;
        let state = self.update(&state, &config).await?;
        Ok(serde_json::to_value(state)?)
    }

    async fn delete_json(&self, state: Value) -> Result<()> {
        let state: R::State = serde_json::from_value(state)?;
        self.delete(&state).await
    }
}
