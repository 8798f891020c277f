//! `jiraserver_permission_grant`
//!
//! A grant is addressed by (scheme, permission, holder). The server has no
//! update for grants, so changing any part of the tuple deletes the old grant
//! and creates a new one.

use super::{finish, require, Resource, Validate};
use crate::config::{ValidationError, ValidationResult};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use jira_server::{Grant, GrantHolder, GrantService, GrantSpec, SchemeRef, PROJECT_ROLE_HOLDER};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

fn default_holder_type() -> String {
    PROJECT_ROLE_HOLDER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantConfig {
    pub permission_scheme: SchemeRef,
    pub permission: String,
    #[serde(default = "default_holder_type")]
    pub holder_type: String,
    /// Project role name (or numeric id)
    pub holder_parameter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantState {
    pub grant_id: i64,
    pub permission_scheme: SchemeRef,
    pub permission: String,
    pub holder_type: String,
    pub holder_parameter: String,
}

impl GrantConfig {
    fn spec(&self) -> GrantSpec {
        GrantSpec {
            permission_scheme: self.permission_scheme.clone(),
            permission: self.permission.clone(),
            holder: GrantHolder::new(&self.holder_type, &self.holder_parameter),
        }
    }
}

impl GrantState {
    fn spec(&self) -> GrantSpec {
        GrantSpec {
            permission_scheme: self.permission_scheme.clone(),
            permission: self.permission.clone(),
            holder: GrantHolder::new(&self.holder_type, &self.holder_parameter),
        }
    }
}

impl From<Grant> for GrantState {
    fn from(grant: Grant) -> Self {
        Self {
            grant_id: grant.id,
            permission_scheme: grant.permission_scheme,
            permission: grant.permission,
            holder_type: grant.holder.holder_type,
            holder_parameter: grant.holder.parameter,
        }
    }
}

impl Validate for GrantConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        match &self.permission_scheme {
            SchemeRef::Name(name) => require(&mut errors, "permission_scheme", name),
            SchemeRef::Id(id) if *id <= 0 => errors.push(ValidationError::new(
                "permission_scheme",
                format!("Invalid permission scheme id {}", id),
            )),
            SchemeRef::Id(_) => {}
        }
        require(&mut errors, "permission", &self.permission);
        require(&mut errors, "holder_parameter", &self.holder_parameter);

        if !self.holder_type.eq_ignore_ascii_case(PROJECT_ROLE_HOLDER) {
            errors.push(ValidationError::new(
                "holder_type",
                format!(
                    "Unsupported holder type '{}'. Must be: {}",
                    self.holder_type, PROJECT_ROLE_HOLDER
                ),
            ));
        }

        finish(errors)
    }
}

pub struct GrantResource {
    service: GrantService,
}

impl GrantResource {
    pub fn new(service: GrantService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Resource for GrantResource {
    type Config = GrantConfig;
    type State = GrantState;

    const TYPE_NAME: &'static str = "jiraserver_permission_grant";

    async fn create(&self, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let created = self.service.create(&config.spec()).await?;
        Ok(created.into())
    }

    async fn read(&self, state: &Self::State) -> Result<Self::State> {
        let found = self.service.get(&state.spec()).await?;
        if found.id != state.grant_id {
            warn!(
                stored = state.grant_id,
                found = found.id,
                "permission scheme grant id changed"
            );
            return Err(ProviderError::Inconsistent(format!(
                "stored grant id {} does not match server grant id {}",
                state.grant_id, found.id
            )));
        }
        Ok(found.into())
    }

    async fn update(&self, state: &Self::State, config: &Self::Config) -> Result<Self::State> {
        config.check()?;
        let wanted = config.spec();
        if wanted == state.spec() {
            return self.read(state).await;
        }

        // Unknown scheme or role must fail before the old grant is gone
        self.service
            .resolve(&wanted.permission_scheme, &wanted.holder.parameter)
            .await?;

        info!(grant_id = state.grant_id, "Replacing permission scheme grant");
        self.service.delete(&state.spec()).await?;
        Ok(self.service.create(&wanted).await?.into())
    }

    async fn delete(&self, state: &Self::State) -> Result<()> {
        Ok(self.service.delete(&state.spec()).await?)
    }
}
